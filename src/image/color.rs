//! Grayscale flattening by desaturation.
//!
//! The pixel is taken to HSV, its saturation is zeroed and the result is taken
//! back to RGB, after which every channel holds the HSV value `max(R, G, B)`.
//! A single channel of that image is the intensity plane. The shortcut below
//! computes the same plane without the round trip.

use crate::image::{OwnedImage, Sample};
use crate::util::{DctHashError, DctHashResult};

/// Number of interleaved channels expected by [`desaturate_rgb`].
pub const RGB_CHANNELS: usize = 3;

/// Flattens an interleaved 3-channel buffer into a single intensity plane.
///
/// Channel order does not matter (RGB and BGR give the same result).
pub fn desaturate_rgb<T>(data: &[T], width: usize, height: usize) -> DctHashResult<OwnedImage<T>>
where
    T: Sample + PartialOrd,
{
    let pixels = width
        .checked_mul(height)
        .ok_or(DctHashError::InvalidDimensions { width, height })?;
    let needed = pixels
        .checked_mul(RGB_CHANNELS)
        .ok_or(DctHashError::InvalidDimensions { width, height })?;
    if data.len() != needed {
        return Err(DctHashError::BufferTooSmall {
            needed,
            got: data.len(),
        });
    }

    let gray = data
        .chunks_exact(RGB_CHANNELS)
        .map(|px| value_channel(px[0], px[1], px[2]))
        .collect();
    OwnedImage::new(gray, width, height)
}

#[inline]
fn value_channel<T: PartialOrd>(a: T, b: T, c: T) -> T {
    let ab = if b > a { b } else { a };
    if c > ab {
        c
    } else {
        ab
    }
}
