use dcthash::{
    average_ac_energy, crop_low_frequency_block, to_frequency_space, CanonicalImage, DctHashError,
    FrequencyMatrix, OwnedImage,
};

fn indexed_matrix(width: usize, height: usize) -> FrequencyMatrix {
    let data = (0..width * height).map(|i| i as f32).collect();
    FrequencyMatrix::new(data, width, height).unwrap()
}

#[test]
fn frequency_space_keeps_dimensions_and_puts_mean_at_dc() {
    let img = OwnedImage::new(vec![100u8; 64 * 32], 64, 32).unwrap();
    let canonical = CanonicalImage::new(img).unwrap();
    let freq = to_frequency_space(&canonical).unwrap();

    assert_eq!((freq.width(), freq.height()), (64, 32));
    let expected_dc = 100.0 * ((64 * 32) as f32).sqrt();
    assert!((freq.dc() - expected_dc).abs() / expected_dc < 1e-5);
    let max_ac = freq.data()[1..].iter().fold(0.0f32, |m, v| m.max(v.abs()));
    assert!(max_ac < 5e-2, "max AC {max_ac}");
}

#[test]
fn frequency_space_of_horizontal_ramp_concentrates_in_first_row() {
    let width = 32;
    let height = 16;
    let data: Vec<f32> = (0..height)
        .flat_map(|_| (0..width).map(|x| x as f32))
        .collect();
    let canonical = CanonicalImage::new(OwnedImage::new(data, width, height).unwrap()).unwrap();
    let freq = to_frequency_space(&canonical).unwrap();

    assert!(freq.get(1, 0).unwrap() < -10.0);
    for y in 1..height {
        for x in 0..width {
            assert!(freq.get(x, y).unwrap().abs() < 5e-2, "({x}, {y})");
        }
    }
}

#[test]
fn crop_uses_fixed_row_divisor() {
    let freq = indexed_matrix(256, 256);

    let block = crop_low_frequency_block(&freq, 16).unwrap();
    assert_eq!((block.width(), block.height()), (16, 16));
    assert_eq!(block.get(15, 15), Some((15 * 256 + 15) as f32));

    let block = crop_low_frequency_block(&freq, 8).unwrap();
    assert_eq!((block.width(), block.height()), (32, 16));

    let block = crop_low_frequency_block(&freq, 1).unwrap();
    assert_eq!((block.width(), block.height()), (256, 16));
}

#[test]
fn crop_rejects_empty_extents() {
    let freq = indexed_matrix(256, 256);
    assert_eq!(
        crop_low_frequency_block(&freq, 0).unwrap_err(),
        DctHashError::CropOutOfBounds {
            width: 256,
            height: 256,
            block_width: 0,
            block_height: 16,
        }
    );
    assert_eq!(
        crop_low_frequency_block(&freq, 512).unwrap_err(),
        DctHashError::CropOutOfBounds {
            width: 256,
            height: 256,
            block_width: 0,
            block_height: 16,
        }
    );

    let short = indexed_matrix(64, 8);
    assert_eq!(
        crop_low_frequency_block(&short, 4).unwrap_err(),
        DctHashError::CropOutOfBounds {
            width: 64,
            height: 8,
            block_width: 16,
            block_height: 0,
        }
    );
}

#[test]
fn one_by_one_crop_has_no_ac_terms() {
    let freq = indexed_matrix(16, 16);
    let block = crop_low_frequency_block(&freq, 16).unwrap();
    assert_eq!((block.width(), block.height()), (1, 1));
    assert_eq!(
        average_ac_energy(&block).unwrap_err(),
        DctHashError::EmptyBlock { len: 1 }
    );
}

#[test]
fn average_ac_energy_over_cropped_block() {
    let freq = indexed_matrix(32, 32);
    let block = crop_low_frequency_block(&freq, 16).unwrap();
    assert_eq!((block.width(), block.height()), (2, 2));
    // Block holds 0, 1, 32, 33; DC is 0.
    let sig = average_ac_energy(&block).unwrap();
    assert_eq!(sig.value(), 22.0);
}
