//! dcthash computes a compact perceptual hash for grayscale or color images.
//!
//! An image is normalized to a power-of-two square (256x256 by default)
//! through a bilinear resize and Gaussian pyramid steps, transformed with an
//! orthonormal 2-D DCT, and reduced to the mean of the AC coefficients in its
//! low-frequency corner. The resulting [`Signature`] is a single `f32`;
//! two signatures are compared through the Hamming distance of their bit
//! patterns.
//!
//! ```no_run
//! use dcthash::{Hasher, ImageView};
//!
//! let pixels = vec![0u8; 300 * 200];
//! let view = ImageView::from_slice(&pixels, 300, 200)?;
//! let hasher = Hasher::new();
//! let signature = hasher.hash(view)?;
//! assert_eq!(hasher.similarity(view, view)?, 1.0);
//! println!("{signature}");
//! # Ok::<(), dcthash::DctHashError>(())
//! ```
//!
//! Optional features: `image-io` (decode files with the `image` crate),
//! `rayon` (parallel [`Hasher::hash_batch`]), `tracing` (pipeline spans) and
//! `serde` (serializable [`Signature`]).

pub mod compare;
pub mod image;
pub mod normalize;
pub mod signature;
mod trace;
pub mod transform;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use compare::{compare_signatures, HashConfig, Hasher};
pub use crate::image::{ImageView, OwnedImage, Sample};
pub use normalize::{CanonicalImage, NormalizeConfig, NormalizePlan, Resample};
pub use signature::{average_ac_energy, Signature};
pub use transform::{crop_low_frequency_block, to_frequency_space, FrequencyMatrix};
pub use util::math::{bit_distance, is_power_of_two, nearest_power_of_two};
pub use util::{DctHashError, DctHashResult};
