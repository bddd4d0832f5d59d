//! Contains the types and functions for the high level pipeline builder API.

mod pipeline;

pub use pipeline::{PixelizeOutput, PixelizePipeline};

use crate::{MAX_BLOCK_SIZE, PixelizeError};
use std::ops::RangeInclusive;

/// The supported range for the contrast and brightness factors.
const FACTOR_RANGE: RangeInclusive<f32> = 0.5..=2.0;

/// An immutable configuration bundle for a pipeline run.
///
/// # Examples
/// ```
/// # use pixelize::PixelizeConfig;
/// let config = PixelizeConfig::new()
///     .contrast(1.2)
///     .brightness(0.9)
///     .block_size(8)
///     .dither(false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelizeConfig {
    /// The contrast factor in `0.5..=2.0`, `1.0` for no change.
    pub contrast: f32,
    /// The brightness factor in `0.5..=2.0`, `1.0` for no change.
    pub brightness: f32,
    /// The edge length in pixels of the square sampled per output pixel,
    /// in `1..=MAX_BLOCK_SIZE`.
    pub block_size: u32,
    /// Whether to apply Floyd–Steinberg dithering during quantization.
    pub dither: bool,
}

impl PixelizeConfig {
    /// Creates a new [`PixelizeConfig`] with default values: neutral
    /// enhancement factors, a block size of `4`, and dithering enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            contrast: 1.0,
            brightness: 1.0,
            block_size: 4,
            dither: true,
        }
    }

    /// Sets the contrast factor.
    ///
    /// The default value is `1.0` (no change).
    #[must_use]
    pub const fn contrast(mut self, contrast: f32) -> Self {
        self.contrast = contrast;
        self
    }

    /// Sets the brightness factor.
    ///
    /// The default value is `1.0` (no change).
    #[must_use]
    pub const fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Sets the pixelization block size.
    ///
    /// The default value is `4`.
    #[must_use]
    pub const fn block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets whether to apply Floyd–Steinberg dithering during quantization.
    ///
    /// The default value is `true`.
    #[must_use]
    pub const fn dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    /// Checks that every option is within its supported range.
    pub(crate) fn validate(&self) -> Result<(), PixelizeError> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(PixelizeError::BlockSizeOutOfRange(self.block_size));
        }
        if !FACTOR_RANGE.contains(&self.contrast) {
            return Err(PixelizeError::EnhancementOutOfRange {
                enhancement: "contrast",
                factor: self.contrast,
            });
        }
        if !FACTOR_RANGE.contains(&self.brightness) {
            return Err(PixelizeError::EnhancementOutOfRange {
                enhancement: "brightness",
                factor: self.brightness,
            });
        }
        Ok(())
    }
}

impl Default for PixelizeConfig {
    fn default() -> Self {
        Self::new()
    }
}
