//! Size normalization to a canonical power-of-two square.
//!
//! An input of any size is first resized to the power-of-two square closest
//! to its dominant dimension, then walked down or up the Gaussian pyramid
//! until it reaches the configured target. The plan for a given input size is
//! available up front through [`NormalizePlan`].

use crate::image::pyramid::{pyr_down, pyr_up};
use crate::image::resize::resize_bilinear;
use crate::image::{ImageView, OwnedImage, Sample};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{dims_are_powers_of_two, nearest_power_of_two};
use crate::util::{DctHashError, DctHashResult};

/// Default canonical side length.
pub const DEFAULT_TARGET_SIZE: usize = 256;

/// Target dimensions of the normalizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Canonical width; must be a power of two.
    pub target_width: usize,
    /// Canonical height; must be a power of two.
    pub target_height: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_SIZE,
            target_height: DEFAULT_TARGET_SIZE,
        }
    }
}

impl NormalizeConfig {
    /// Square target of side `size`.
    pub fn square(size: usize) -> Self {
        Self {
            target_width: size,
            target_height: size,
        }
    }

    /// Checks that the target is a power-of-two square.
    ///
    /// The pyramid walk scales both sides together from a square, so a
    /// rectangular target is unreachable and rejected as `InvalidDimensions`.
    pub fn validate(&self) -> DctHashResult<()> {
        if !dims_are_powers_of_two(self.target_width, self.target_height) {
            return Err(DctHashError::NonPowerOfTwoDimension {
                width: self.target_width,
                height: self.target_height,
            });
        }
        if self.target_width != self.target_height {
            return Err(DctHashError::InvalidDimensions {
                width: self.target_width,
                height: self.target_height,
            });
        }
        Ok(())
    }
}

/// Owned image whose width and height are both powers of two.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalImage<T> {
    img: OwnedImage<T>,
}

impl<T: Copy> CanonicalImage<T> {
    /// Validates that `img` has power-of-two dimensions.
    pub fn new(img: OwnedImage<T>) -> DctHashResult<Self> {
        if !dims_are_powers_of_two(img.width(), img.height()) {
            return Err(DctHashError::NonPowerOfTwoDimension {
                width: img.width(),
                height: img.height(),
            });
        }
        Ok(Self { img })
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        self.img.view()
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Releases the underlying owned image.
    pub fn into_inner(self) -> OwnedImage<T> {
        self.img
    }
}

/// Pyramid walk applied after the initial square resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resample {
    /// The resized square already has the target size.
    Keep,
    /// Halve both dimensions this many times.
    Halve(u32),
    /// Double both dimensions this many times.
    Double(u32),
}

impl Resample {
    /// Number of pyramid steps.
    pub fn steps(self) -> u32 {
        match self {
            Resample::Keep => 0,
            Resample::Halve(n) | Resample::Double(n) => n,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Resample::Keep => "keep",
            Resample::Halve(_) => "halve",
            Resample::Double(_) => "double",
        }
    }
}

/// Normalization steps for a given input size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizePlan {
    /// Side of the power-of-two square the input is resized to.
    pub resize_dim: usize,
    /// Pyramid walk from `resize_dim` to the target.
    pub resample: Resample,
}

impl NormalizePlan {
    /// Plans normalization of a `width x height` input.
    ///
    /// The resize side is the nearest power of two of whichever dimension it
    /// approximates more closely; on a tie the height wins.
    pub fn for_dimensions(
        width: usize,
        height: usize,
        cfg: &NormalizeConfig,
    ) -> DctHashResult<Self> {
        if width == 0 || height == 0 {
            return Err(DctHashError::InvalidDimensions { width, height });
        }
        cfg.validate()?;

        let x_dim = nearest_power_of_two(width as f64);
        let y_dim = nearest_power_of_two(height as f64);
        let resize_dim = if width.abs_diff(x_dim) < height.abs_diff(y_dim) {
            x_dim
        } else {
            y_dim
        };

        let (tw, th) = (cfg.target_width, cfg.target_height);
        let resample = if resize_dim == tw && resize_dim == th {
            Resample::Keep
        } else if resize_dim > tw {
            Resample::Halve(halving_steps(resize_dim, resize_dim, tw, th))
        } else {
            Resample::Double(doubling_steps(resize_dim, resize_dim, tw, th))
        };

        Ok(Self {
            resize_dim,
            resample,
        })
    }
}

/// Normalizes `src` to a canonical image of the configured target size.
pub fn normalize<T: Sample>(
    src: ImageView<'_, T>,
    cfg: &NormalizeConfig,
) -> DctHashResult<CanonicalImage<T>> {
    let _span = trace_span!("normalize", width = src.width(), height = src.height()).entered();

    let plan = NormalizePlan::for_dimensions(src.width(), src.height(), cfg)?;
    trace_event!(
        "normalize_plan",
        resize_dim = plan.resize_dim,
        direction = plan.resample.label(),
        steps = plan.resample.steps(),
    );

    let resized = resize_bilinear(src, plan.resize_dim, plan.resize_dim)?;
    match plan.resample {
        Resample::Keep => CanonicalImage::new(resized),
        Resample::Halve(_) => downsample(resized.view(), cfg.target_width, cfg.target_height),
        Resample::Double(_) => upsample(resized.view(), cfg.target_width, cfg.target_height),
    }
}

/// Halves `src` with [`pyr_down`] while both of its dimensions exceed the
/// target.
///
/// Source and target dimensions must be powers of two, and the source must be
/// at least as large as the target in both dimensions.
pub fn downsample<T: Sample>(
    src: ImageView<'_, T>,
    target_width: usize,
    target_height: usize,
) -> DctHashResult<CanonicalImage<T>> {
    let (width, height) = (src.width(), src.height());
    if width < target_width || height < target_height {
        return Err(DctHashError::DimensionTooSmall {
            width,
            height,
            target_width,
            target_height,
        });
    }
    check_powers_of_two(width, height, target_width, target_height)?;

    let steps = halving_steps(width, height, target_width, target_height);
    let mut current = OwnedImage::from_view(src)?;
    for _ in 0..steps {
        current = pyr_down(current.view())?;
    }
    CanonicalImage::new(current)
}

/// Doubles `src` with [`pyr_up`] while both of its dimensions fall short of
/// the target.
///
/// Source and target dimensions must be powers of two, and the source must be
/// no larger than the target in both dimensions.
pub fn upsample<T: Sample>(
    src: ImageView<'_, T>,
    target_width: usize,
    target_height: usize,
) -> DctHashResult<CanonicalImage<T>> {
    let (width, height) = (src.width(), src.height());
    if width > target_width || height > target_height {
        return Err(DctHashError::DimensionTooLarge {
            width,
            height,
            target_width,
            target_height,
        });
    }
    check_powers_of_two(width, height, target_width, target_height)?;

    let steps = doubling_steps(width, height, target_width, target_height);
    let mut current = OwnedImage::from_view(src)?;
    for _ in 0..steps {
        current = pyr_up(current.view())?;
    }
    CanonicalImage::new(current)
}

fn check_powers_of_two(
    width: usize,
    height: usize,
    target_width: usize,
    target_height: usize,
) -> DctHashResult<()> {
    if !dims_are_powers_of_two(width, height) {
        return Err(DctHashError::NonPowerOfTwoDimension { width, height });
    }
    // Both target dimensions are checked, not only the height.
    if !dims_are_powers_of_two(target_width, target_height) {
        return Err(DctHashError::NonPowerOfTwoDimension {
            width: target_width,
            height: target_height,
        });
    }
    Ok(())
}

fn halving_steps(mut width: usize, mut height: usize, tw: usize, th: usize) -> u32 {
    let mut steps = 0;
    while width > tw && height > th {
        width /= 2;
        height /= 2;
        steps += 1;
    }
    steps
}

fn doubling_steps(mut width: usize, mut height: usize, tw: usize, th: usize) -> u32 {
    let mut steps = 0;
    while width < tw && height < th {
        width *= 2;
        height *= 2;
        steps += 1;
    }
    steps
}
