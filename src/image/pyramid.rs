//! Gaussian pyramid resampling.
//!
//! Both directions use the separable 5-tap binomial kernel `[1 4 6 4 1] / 16`
//! with reflect-101 borders (`dcb|abcd|cba`). `pyr_down` blurs and keeps every
//! other sample; `pyr_up` interleaves zeros and blurs with the kernel scaled
//! by 2 per axis so that brightness is preserved. Sums are accumulated in
//! `f32` and converted back to the sample type once per output pixel.

use crate::image::{ImageView, OwnedImage, Sample};
use crate::util::{DctHashError, DctHashResult};

const KERNEL: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];
const RADIUS: isize = 2;

/// Halves both dimensions of `src`.
pub fn pyr_down<T: Sample>(src: ImageView<'_, T>) -> DctHashResult<OwnedImage<T>> {
    let (width, height) = (src.width(), src.height());
    let (dst_width, dst_height) = (width / 2, height / 2);
    if dst_width == 0 || dst_height == 0 {
        return Err(DctHashError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }

    let mut horizontal = Vec::with_capacity(dst_width * height);
    for y in 0..height {
        let row = src.row_checked(y)?;
        for x in 0..dst_width {
            let center = (2 * x) as isize;
            let sum: f32 = KERNEL
                .iter()
                .enumerate()
                .map(|(k, w)| w * row[reflect_101(center + k as isize - RADIUS, width)].to_f32())
                .sum();
            horizontal.push(sum);
        }
    }

    let mut out = Vec::with_capacity(dst_width * dst_height);
    for y in 0..dst_height {
        let center = (2 * y) as isize;
        for x in 0..dst_width {
            let sum: f32 = KERNEL
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let sy = reflect_101(center + k as isize - RADIUS, height);
                    w * horizontal[sy * dst_width + x]
                })
                .sum();
            out.push(T::from_f32(sum / 256.0));
        }
    }

    OwnedImage::new(out, dst_width, dst_height)
}

/// Doubles both dimensions of `src`.
pub fn pyr_up<T: Sample>(src: ImageView<'_, T>) -> DctHashResult<OwnedImage<T>> {
    let (width, height) = (src.width(), src.height());
    let dst_width = width
        .checked_mul(2)
        .ok_or(DctHashError::InvalidDimensions { width, height })?;
    let dst_height = height
        .checked_mul(2)
        .ok_or(DctHashError::InvalidDimensions { width, height })?;

    let mut horizontal = Vec::with_capacity(dst_width * height);
    for y in 0..height {
        let row = src.row_checked(y)?;
        for x in 0..dst_width {
            horizontal.push(upsampled_tap(x, dst_width, |i| row[i].to_f32()));
        }
    }

    let mut out = Vec::with_capacity(dst_width * dst_height);
    for y in 0..dst_height {
        for x in 0..dst_width {
            let sum = upsampled_tap(y, dst_height, |i| horizontal[i * dst_width + x]);
            out.push(T::from_f32(sum / 64.0));
        }
    }

    OwnedImage::new(out, dst_width, dst_height)
}

/// Filters position `pos` of the zero-interleaved signal of length `len`,
/// where even positions `2i` hold `sample(i)`.
#[inline]
fn upsampled_tap(pos: usize, len: usize, sample: impl Fn(usize) -> f32) -> f32 {
    KERNEL
        .iter()
        .enumerate()
        .filter_map(|(k, w)| {
            let idx = reflect_101(pos as isize + k as isize - RADIUS, len);
            (idx % 2 == 0).then(|| w * sample(idx / 2))
        })
        .sum()
}

/// Maps an out-of-range index back into `[0, len)` by mirroring about the
/// edge samples without repeating them.
#[inline]
fn reflect_101(mut idx: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    while idx < 0 || idx > last {
        if idx < 0 {
            idx = -idx;
        }
        if idx > last {
            idx = 2 * last - idx;
        }
    }
    idx as usize
}

#[cfg(test)]
mod tests {
    use super::{pyr_down, pyr_up, reflect_101};
    use crate::image::ImageView;

    fn ramp(width: usize, height: usize, step: f32) -> Vec<f32> {
        (0..height)
            .flat_map(|_| (0..width).map(move |x| x as f32 * step))
            .collect()
    }

    #[test]
    fn reflect_101_mirrors_without_repeating_edges() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 2), 1);
        assert_eq!(reflect_101(-7, 1), 0);
    }

    #[test]
    fn pyr_down_halves_and_preserves_linear_interior() {
        let data = ramp(8, 4, 10.0);
        let view = ImageView::from_slice(&data, 8, 4).unwrap();
        let out = pyr_down(view).unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
        let row = out.view().row(0).unwrap().to_vec();
        assert!((row[0] - 7.5).abs() < 1e-4);
        assert!((row[1] - 20.0).abs() < 1e-4);
        assert!((row[2] - 40.0).abs() < 1e-4);
        assert_eq!(out.view().row(1).unwrap(), row.as_slice());
    }

    #[test]
    fn pyr_up_doubles_and_interpolates() {
        let data = ramp(4, 1, 10.0);
        let view = ImageView::from_slice(&data, 4, 1).unwrap();
        let out = pyr_up(view).unwrap();
        assert_eq!((out.width(), out.height()), (8, 2));
        let row = out.view().row(0).unwrap();
        assert!((row[0] - 2.5).abs() < 1e-4);
        assert!((row[2] - 10.0).abs() < 1e-4);
        assert!((row[3] - 15.0).abs() < 1e-4);
        assert!((row[7] - 30.0).abs() < 1e-4);
        assert_eq!(out.view().row(1).unwrap(), row);
    }

    #[test]
    fn pyramid_preserves_constant_images() {
        let data = vec![173u8; 16 * 16];
        let view = ImageView::from_slice(&data, 16, 16).unwrap();
        let down = pyr_down(view).unwrap();
        assert!(down.data().iter().all(|&v| v == 173));
        let up = pyr_up(view).unwrap();
        assert_eq!((up.width(), up.height()), (32, 32));
        assert!(up.data().iter().all(|&v| v == 173));
    }

    #[test]
    fn pyr_down_rejects_single_pixel_axis() {
        let data = [1u8; 4];
        let view = ImageView::from_slice(&data, 4, 1).unwrap();
        assert!(pyr_down(view).is_err());
    }
}
