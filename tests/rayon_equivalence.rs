#![cfg(feature = "rayon")]

use dcthash::{HashConfig, Hasher, ImageView, NormalizeConfig};

fn make_image(width: usize, height: usize, salt: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11 + salt) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

#[test]
fn parallel_batch_matches_sequential_hashing() {
    let sizes = [(256, 256), (512, 384), (90, 60), (1024, 1024), (33, 250), (128, 128)];
    let images: Vec<(Vec<u8>, usize, usize)> = sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| (make_image(w, h, i * 17), w, h))
        .collect();
    let views: Vec<ImageView<'_, u8>> = images
        .iter()
        .map(|(data, w, h)| ImageView::from_slice(data, *w, *h).unwrap())
        .collect();

    for cfg in [
        HashConfig::default(),
        HashConfig {
            normalize: NormalizeConfig::square(64),
            crop_divisor: 8,
        },
    ] {
        let hasher = Hasher::new().with_config(cfg);
        let batch = hasher.hash_batch(&views);
        let sequential: Vec<_> = views.iter().map(|v| hasher.hash(*v)).collect();
        assert_eq!(batch, sequential);
    }
}
