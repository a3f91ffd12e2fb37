//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Color inputs are
//! flattened with [`desaturate_rgb`] so decoded files go through the same
//! grayscale path as raw RGB buffers.

use crate::image::color::desaturate_rgb;
use crate::image::{ImageView, OwnedImage};
use crate::util::{DctHashError, DctHashResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> DctHashResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned intensity image from a dynamic image.
///
/// Single-channel inputs are copied as they are; everything else is converted
/// to 8-bit RGB and desaturated.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> DctHashResult<OwnedImage<u8>> {
    match img {
        image::DynamicImage::ImageLuma8(gray) => OwnedImage::from_view(view_from_gray_image(gray)?),
        other => {
            let rgb = other.to_rgb8();
            desaturate_rgb(rgb.as_raw(), rgb.width() as usize, rgb.height() as usize)
        }
    }
}

/// Loads an image from disk and flattens it to an intensity image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> DctHashResult<OwnedImage<u8>> {
    let img = image::open(path).map_err(|err| DctHashError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
