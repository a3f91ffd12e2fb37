//! Bilinear resizing.

use crate::image::{ImageView, OwnedImage, Sample};
use crate::util::{DctHashError, DctHashResult};

/// Resizes `src` to `width x height` with bilinear interpolation.
///
/// Destination pixel centers map to source coordinates with
/// `sx = (dx + 0.5) * src_w / dst_w - 0.5` (likewise for `y`). Coordinates
/// left of the first sample or right of the last one clamp to the edge.
/// Resizing to the source dimensions is an exact copy.
pub fn resize_bilinear<T: Sample>(
    src: ImageView<'_, T>,
    width: usize,
    height: usize,
) -> DctHashResult<OwnedImage<T>> {
    let len = width
        .checked_mul(height)
        .filter(|&len| len > 0)
        .ok_or(DctHashError::InvalidDimensions { width, height })?;
    if width == src.width() && height == src.height() {
        return OwnedImage::from_view(src);
    }

    let xs = axis_taps(src.width(), width);
    let ys = axis_taps(src.height(), height);

    let mut out = Vec::with_capacity(len);
    for &(y0, y1, fy) in &ys {
        let row0 = src.row_checked(y0)?;
        let row1 = src.row_checked(y1)?;
        for &(x0, x1, fx) in &xs {
            let top = row0[x0].to_f32() * (1.0 - fx) + row0[x1].to_f32() * fx;
            let bottom = row1[x0].to_f32() * (1.0 - fx) + row1[x1].to_f32() * fx;
            out.push(T::from_f32(top * (1.0 - fy) + bottom * fy));
        }
    }

    OwnedImage::new(out, width, height)
}

/// Precomputes `(i0, i1, frac)` sampling taps along one axis.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let pos = (d as f64 + 0.5) * scale - 0.5;
            if pos <= 0.0 {
                return (0, 0, 0.0);
            }
            let i0 = pos.floor() as usize;
            if i0 >= last {
                return (last, last, 0.0);
            }
            (i0, i0 + 1, (pos - i0 as f64) as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::resize_bilinear;
    use crate::image::ImageView;

    #[test]
    fn resize_to_same_size_is_identity() {
        let data: Vec<u8> = (0u8..12).collect();
        let view = ImageView::from_slice(&data, 4, 3).unwrap();
        let out = resize_bilinear(view, 4, 3).unwrap();
        assert_eq!(out.data(), data.as_slice());
    }

    #[test]
    fn resize_doubles_with_edge_clamping() {
        let data = [0.0f32, 10.0];
        let view = ImageView::from_slice(&data, 2, 1).unwrap();
        let out = resize_bilinear(view, 4, 1).unwrap();
        assert_eq!(out.data(), &[0.0f32, 2.5, 7.5, 10.0]);
    }

    #[test]
    fn resize_halves_by_averaging_pairs() {
        let data = [0u8, 100, 50, 250];
        let view = ImageView::from_slice(&data, 4, 1).unwrap();
        let out = resize_bilinear(view, 2, 1).unwrap();
        assert_eq!(out.data(), &[50u8, 150]);
    }

    #[test]
    fn resize_rejects_empty_target() {
        let data = [1u8; 4];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        assert!(resize_bilinear(view, 0, 2).is_err());
    }
}
