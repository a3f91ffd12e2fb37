//! Frequency-space conversion and low-frequency block extraction.

use crate::image::{ImageView, OwnedImage, Sample};
use crate::normalize::CanonicalImage;
use crate::trace::trace_span;
use crate::util::{DctHashError, DctHashResult};

pub mod dct;

pub use dct::{dct_2d, Dct2d};

/// Row divisor of the low-frequency block. Unlike the column divisor it does
/// not follow the caller's `n`.
pub const LOW_FREQUENCY_ROW_DIVISOR: usize = 16;

/// Real-valued DCT coefficients, row-major.
///
/// `(0, 0)` is the DC coefficient; every other position is an AC coefficient.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyMatrix {
    coeffs: OwnedImage<f32>,
}

impl FrequencyMatrix {
    /// Wraps a row-major coefficient buffer of exactly `width * height`.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> DctHashResult<Self> {
        Ok(Self {
            coeffs: OwnedImage::new(data, width, height)?,
        })
    }

    /// Number of coefficient columns.
    pub fn width(&self) -> usize {
        self.coeffs.width()
    }

    /// Number of coefficient rows.
    pub fn height(&self) -> usize {
        self.coeffs.height()
    }

    /// Total number of coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.data().len()
    }

    /// Always `false`; matrices hold at least one coefficient.
    pub fn is_empty(&self) -> bool {
        self.coeffs.data().is_empty()
    }

    /// The DC coefficient at `(0, 0)`.
    pub fn dc(&self) -> f32 {
        self.coeffs.data()[0]
    }

    /// Coefficient at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.coeffs.view().get(x, y).copied()
    }

    /// Borrowed view of the coefficients.
    pub fn view(&self) -> ImageView<'_, f32> {
        self.coeffs.view()
    }

    /// Row-major coefficient buffer.
    pub fn data(&self) -> &[f32] {
        self.coeffs.data()
    }
}

/// Applies the orthonormal 2-D DCT to a canonical image.
pub fn to_frequency_space<T: Sample>(image: &CanonicalImage<T>) -> DctHashResult<FrequencyMatrix> {
    let view = image.view();
    let (width, height) = (view.width(), view.height());
    let _span = trace_span!("to_frequency_space", width = width, height = height).entered();

    let mut data: Vec<f32> = view.as_slice().iter().map(|v| v.to_f32()).collect();
    Dct2d::plan(width, height)?.process(&mut data)?;
    FrequencyMatrix::new(data, width, height)
}

/// Extracts the top-left block spanning columns `[0, width / n)` and rows
/// `[0, height / 16)`.
///
/// Fails with [`DctHashError::CropOutOfBounds`] when the block would be empty
/// or extend past the matrix.
pub fn crop_low_frequency_block(freq: &FrequencyMatrix, n: usize) -> DctHashResult<FrequencyMatrix> {
    let block_height = freq.height() / LOW_FREQUENCY_ROW_DIVISOR;
    let block_width = match freq.width().checked_div(n) {
        Some(w) => w,
        None => {
            return Err(DctHashError::CropOutOfBounds {
                width: freq.width(),
                height: freq.height(),
                block_width: 0,
                block_height,
            })
        }
    };

    let block = freq.view().roi(0, 0, block_width, block_height)?;
    Ok(FrequencyMatrix {
        coeffs: OwnedImage::from_view(block)?,
    })
}
