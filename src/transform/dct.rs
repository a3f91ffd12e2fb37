//! Orthonormal 2-D DCT-II built on `rustdct`.

use crate::util::{DctHashError, DctHashResult};
use rustdct::{DctPlanner, TransformType2And3};
use std::sync::Arc;

/// Planned separable 2-D DCT for a fixed `width x height` shape.
///
/// `rustdct` computes the unnormalized DCT-II; each axis is rescaled by
/// `sqrt(1/N)` for the first coefficient and `sqrt(2/N)` for the rest, which
/// makes the transform orthonormal and puts the mean intensity (times
/// `sqrt(width * height)`) at `(0, 0)`.
pub struct Dct2d {
    width: usize,
    height: usize,
    rows: Arc<dyn TransformType2And3<f32>>,
    cols: Arc<dyn TransformType2And3<f32>>,
}

impl Dct2d {
    /// Plans the row and column transforms.
    pub fn plan(width: usize, height: usize) -> DctHashResult<Self> {
        if width == 0 || height == 0 {
            return Err(DctHashError::InvalidDimensions { width, height });
        }
        let mut planner = DctPlanner::new();
        let rows = planner.plan_dct2(width);
        let cols = planner.plan_dct2(height);
        Ok(Self {
            width,
            height,
            rows,
            cols,
        })
    }

    /// Transforms a row-major buffer in place.
    pub fn process(&self, data: &mut [f32]) -> DctHashResult<()> {
        let needed = self.width * self.height;
        if data.len() != needed {
            return Err(DctHashError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }

        let mut scratch = vec![0f32; self.rows.get_scratch_len()];
        let (row_dc, row_ac) = axis_scales(self.width);
        for row in data.chunks_exact_mut(self.width) {
            self.rows.process_dct2_with_scratch(row, &mut scratch);
            scale(row, row_dc, row_ac);
        }

        let mut scratch = vec![0f32; self.cols.get_scratch_len()];
        let mut column = vec![0f32; self.height];
        let (col_dc, col_ac) = axis_scales(self.height);
        for x in 0..self.width {
            for (y, dst) in column.iter_mut().enumerate() {
                *dst = data[y * self.width + x];
            }
            self.cols.process_dct2_with_scratch(&mut column, &mut scratch);
            scale(&mut column, col_dc, col_ac);
            for (y, &value) in column.iter().enumerate() {
                data[y * self.width + x] = value;
            }
        }

        Ok(())
    }
}

/// Computes the orthonormal DCT-II of a row-major `width x height` buffer.
pub fn dct_2d(data: &[f32], width: usize, height: usize) -> DctHashResult<Vec<f32>> {
    let plan = Dct2d::plan(width, height)?;
    let mut out = data.to_vec();
    plan.process(&mut out)?;
    Ok(out)
}

fn axis_scales(len: usize) -> (f32, f32) {
    let n = len as f32;
    ((1.0 / n).sqrt(), (2.0 / n).sqrt())
}

#[inline]
fn scale(values: &mut [f32], dc: f32, ac: f32) {
    if let Some((first, rest)) = values.split_first_mut() {
        *first *= dc;
        for v in rest {
            *v *= ac;
        }
    }
}
