//! Error types for dcthash.

use thiserror::Error;

/// Result alias for dcthash operations.
pub type DctHashResult<T> = std::result::Result<T, DctHashError>;

/// Errors that can occur while deriving or comparing perceptual hashes.
///
/// Every variant is a precondition violation detected before any partial
/// result is produced; none of them are transient.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DctHashError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer does not hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A source or target dimension is not a power of two.
    #[error("dimensions {width}x{height} are not powers of two")]
    NonPowerOfTwoDimension { width: usize, height: usize },
    /// The source is smaller than the downsampling target.
    #[error("cannot downsample {width}x{height} to larger target {target_width}x{target_height}")]
    DimensionTooSmall {
        width: usize,
        height: usize,
        target_width: usize,
        target_height: usize,
    },
    /// The source is larger than the upsampling target.
    #[error("cannot upsample {width}x{height} to smaller target {target_width}x{target_height}")]
    DimensionTooLarge {
        width: usize,
        height: usize,
        target_width: usize,
        target_height: usize,
    },
    /// The requested low-frequency block is empty or exceeds the matrix.
    #[error(
        "crop {block_width}x{block_height} out of bounds for {width}x{height} coefficient matrix"
    )]
    CropOutOfBounds {
        width: usize,
        height: usize,
        block_width: usize,
        block_height: usize,
    },
    /// The block holds fewer than two coefficients, so it has no AC terms.
    #[error("coefficient block of {len} element(s) has no AC coefficients")]
    EmptyBlock { len: usize },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
