use dcthash::image::pyramid::{pyr_down, pyr_up};
use dcthash::transform::dct_2d;
use dcthash::{Hasher, ImageView};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn bench_hash(c: &mut Criterion) {
    let hasher = Hasher::new();

    for (name, width, height) in [
        ("hash_256_keep", 256, 256),
        ("hash_1920x1080_downsample", 1920, 1080),
        ("hash_100x80_upsample", 100, 80),
    ] {
        let image = make_image(width, height);
        let view = ImageView::from_slice(&image, width, height).unwrap();
        c.bench_function(name, |b| {
            b.iter(|| black_box(hasher.hash(view).unwrap()));
        });
    }

    let a = make_image(640, 480);
    let b = make_image(480, 640);
    let va = ImageView::from_slice(&a, 640, 480).unwrap();
    let vb = ImageView::from_slice(&b, 480, 640).unwrap();
    c.bench_function("similarity_640x480", |bench| {
        bench.iter(|| black_box(hasher.similarity(va, vb).unwrap()));
    });
}

fn bench_stages(c: &mut Criterion) {
    let image = make_image(512, 512);
    let view = ImageView::from_slice(&image, 512, 512).unwrap();
    c.bench_function("pyr_down_512", |b| {
        b.iter(|| black_box(pyr_down(view).unwrap()));
    });

    let small = make_image(128, 128);
    let small_view = ImageView::from_slice(&small, 128, 128).unwrap();
    c.bench_function("pyr_up_128", |b| {
        b.iter(|| black_box(pyr_up(small_view).unwrap()));
    });

    let floats: Vec<f32> = make_image(256, 256).into_iter().map(f32::from).collect();
    c.bench_function("dct_256", |b| {
        b.iter(|| black_box(dct_2d(&floats, 256, 256).unwrap()));
    });
}

criterion_group!(benches, bench_hash, bench_stages);
criterion_main!(benches);
