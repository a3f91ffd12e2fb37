//! Image views, owned buffers and the resampling collaborators of the hash
//! pipeline.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. `OwnedImage` is the
//! contiguous counterpart produced by every resampling step.

use crate::util::{DctHashError, DctHashResult};

pub mod color;
#[cfg(feature = "image-io")]
pub mod io;
pub mod pyramid;
pub mod resize;

/// Intensity sample type stored in an image.
///
/// Resampling accumulates in `f32` and converts back through
/// [`Sample::from_f32`], so the sample type of an image survives the
/// normalization steps. Integral samples round to nearest and saturate.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Widens the sample to `f32`.
    fn to_f32(self) -> f32;
    /// Narrows an accumulated value back to the sample type.
    fn from_f32(value: f32) -> Self;
}

impl Sample for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, 255.0) as u8
    }
}

impl Sample for u16 {
    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value.round().clamp(0.0, 65535.0) as u16
    }
}

impl Sample for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }
}

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> DctHashResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> DctHashResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(DctHashError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy view of the `width x height` region at `(x, y)`.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> DctHashResult<ImageView<'a, T>> {
        let out_of_bounds = DctHashError::CropOutOfBounds {
            width: self.width,
            height: self.height,
            block_width: width,
            block_height: height,
        };
        if width == 0 || height == 0 {
            return Err(out_of_bounds);
        }
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(DctHashError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(DctHashError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }

    /// Returns row `y`, reporting the buffer shortfall if it is missing.
    pub(crate) fn row_checked(&self, y: usize) -> DctHashResult<&'a [T]> {
        self.row(y).ok_or_else(|| {
            let needed = y
                .checked_mul(self.stride)
                .and_then(|v| v.checked_add(self.width))
                .unwrap_or(usize::MAX);
            DctHashError::BufferTooSmall {
                needed,
                got: self.data.len(),
            }
        })
    }
}

/// Owned contiguous image buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy> OwnedImage<T> {
    /// Creates an owned image from a contiguous row-major buffer.
    ///
    /// The buffer length must equal `width * height`.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> DctHashResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(DctHashError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(DctHashError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, T>) -> DctHashResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            data.extend_from_slice(view.row_checked(y)?);
        }
        Self::new(data, width, height)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the image and returns its row-major sample buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> DctHashResult<usize> {
    if width == 0 || height == 0 {
        return Err(DctHashError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(DctHashError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(DctHashError::InvalidDimensions { width, height })?;
    Ok(needed)
}
