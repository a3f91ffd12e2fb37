//! The hash pipeline and image comparison.

use crate::image::color::desaturate_rgb;
use crate::image::{ImageView, Sample};
use crate::normalize::{normalize, NormalizeConfig};
use crate::signature::{average_ac_energy, Signature};
use crate::trace::{trace_event, trace_span};
use crate::transform::{crop_low_frequency_block, to_frequency_space};
use crate::util::DctHashResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Default column divisor of the low-frequency block.
pub const DEFAULT_CROP_DIVISOR: usize = 16;

/// Configuration of the hash pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashConfig {
    /// Canonical size every input is normalized to.
    pub normalize: NormalizeConfig,
    /// Column divisor `n` of the low-frequency block (rows always use 16).
    pub crop_divisor: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            crop_divisor: DEFAULT_CROP_DIVISOR,
        }
    }
}

/// Derives and compares perceptual signatures.
///
/// A `Hasher` only holds its configuration; every call is independent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hasher {
    cfg: HashConfig,
}

impl Hasher {
    /// Creates a hasher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pipeline configuration.
    pub fn with_config(mut self, cfg: HashConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &HashConfig {
        &self.cfg
    }

    /// Hashes a single-channel intensity image.
    pub fn hash<T: Sample>(&self, image: ImageView<'_, T>) -> DctHashResult<Signature> {
        let _span = trace_span!("hash", width = image.width(), height = image.height()).entered();

        let canonical = normalize(image, &self.cfg.normalize)?;
        let freq = to_frequency_space(&canonical)?;
        let block = crop_low_frequency_block(&freq, self.cfg.crop_divisor)?;
        let signature = average_ac_energy(&block)?;

        trace_event!(
            "signature",
            value = signature.value(),
            bits = signature.bits(),
        );
        Ok(signature)
    }

    /// Hashes an interleaved 3-channel image after desaturating it.
    pub fn hash_rgb<T>(&self, data: &[T], width: usize, height: usize) -> DctHashResult<Signature>
    where
        T: Sample + PartialOrd,
    {
        let gray = desaturate_rgb(data, width, height)?;
        self.hash(gray.view())
    }

    /// Hashes both images and scores their signatures.
    pub fn similarity<T: Sample>(
        &self,
        a: ImageView<'_, T>,
        b: ImageView<'_, T>,
    ) -> DctHashResult<f32> {
        let h1 = self.hash(a)?;
        let h2 = self.hash(b)?;
        Ok(compare_signatures(h1, h2))
    }

    /// Hashes every image, returning one result per input in input order.
    ///
    /// Images are hashed in parallel when the `rayon` feature is enabled.
    pub fn hash_batch<T: Sample>(&self, images: &[ImageView<'_, T>]) -> Vec<DctHashResult<Signature>> {
        #[cfg(feature = "rayon")]
        {
            images.par_iter().map(|img| self.hash(*img)).collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            images.iter().map(|img| self.hash(*img)).collect()
        }
    }

    /// Loads an image file and hashes it.
    #[cfg(feature = "image-io")]
    pub fn hash_file<P: AsRef<std::path::Path>>(&self, path: P) -> DctHashResult<Signature> {
        let img = crate::image::io::load_gray_image(path)?;
        self.hash(img.view())
    }
}

/// Similarity of two precomputed signatures:
/// `1 - bit_distance(h1, h2) / 32`.
pub fn compare_signatures(h1: Signature, h2: Signature) -> f32 {
    h1.similarity(h2)
}
