//! Contains various types needed across the crate.

use crate::{MAX_BLOCK_SIZE, PaletteTable};
use palette::Srgb;
use std::{
    error::Error,
    fmt::{Debug, Display},
};
#[cfg(feature = "image")]
use {
    image::RgbImage,
    palette::cast::{ComponentsAs, IntoComponents},
};

/// An error for preconditions that abort a pipeline run before any processing.
///
/// A fatal error produces no partial output: neither an export nor a display
/// buffer is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelizeError {
    /// The resolved palette contains no valid colors.
    EmptyPalette,
    /// The input image has zero width or zero height.
    EmptyImage,
    /// The pixel buffer length disagrees with the stated dimensions.
    BufferSizeMismatch {
        /// The length implied by the dimensions (`width * height`).
        expected: usize,
        /// The actual length of the supplied buffer.
        actual: usize,
    },
    /// The pixelization block size is outside `1..=MAX_BLOCK_SIZE`.
    BlockSizeOutOfRange(u32),
    /// An enhancement factor is outside `0.5..=2.0`.
    EnhancementOutOfRange {
        /// Which enhancement the factor belongs to (`"contrast"` or `"brightness"`).
        enhancement: &'static str,
        /// The rejected factor.
        factor: f32,
    },
}

impl Display for PixelizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPalette => write!(f, "palette has no valid colors"),
            Self::EmptyImage => write!(f, "image has zero width or height"),
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "pixel buffer has length {actual} but the dimensions imply {expected}")
            }
            Self::BlockSizeOutOfRange(size) => {
                write!(f, "block size {size} is outside the supported range 1..={MAX_BLOCK_SIZE}")
            }
            Self::EnhancementOutOfRange { enhancement, factor } => {
                write!(f, "{enhancement} factor {factor} is outside the supported range 0.5..=2.0")
            }
        }
    }
}

impl Error for PixelizeError {}

/// An owned, row-major grid of RGB pixels with validated dimensions.
///
/// Both dimensions are at least `1` and the pixel count equals
/// `width * height`. The origin is the top-left pixel.
///
/// Each pipeline stage consumes or borrows a buffer and produces a new one;
/// buffers are never shared between stages or across pipeline runs.
///
/// # Examples
/// From raw pixels:
/// ```
/// # use pixelize::RasterBuffer;
/// # use palette::Srgb;
/// # fn main() -> Result<(), pixelize::PixelizeError> {
/// let buffer = RasterBuffer::new(2, 1, vec![Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)])?;
/// # Ok(())
/// # }
/// ```
///
/// From an image (needs the `image` feature to be enabled):
/// ```no_run
/// # use pixelize::RasterBuffer;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgb8();
/// let buffer = RasterBuffer::try_from(&img)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    /// The width of the grid in pixels.
    width: u32,
    /// The height of the grid in pixels.
    height: u32,
    /// The pixels in row-major order, top-left origin.
    pixels: Vec<Srgb<u8>>,
}

impl RasterBuffer {
    /// Creates a [`RasterBuffer`] without validating the dimensions.
    pub(crate) fn new_unchecked(width: u32, height: u32, pixels: Vec<Srgb<u8>>) -> Self {
        debug_assert_eq!(width as usize * height as usize, pixels.len());
        Self { width, height, pixels }
    }

    /// Creates a new [`RasterBuffer`] from row-major pixels.
    ///
    /// # Errors
    /// Returns [`PixelizeError::EmptyImage`] if either dimension is zero and
    /// [`PixelizeError::BufferSizeMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Srgb<u8>>) -> Result<Self, PixelizeError> {
        if width == 0 || height == 0 {
            return Err(PixelizeError::EmptyImage);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(PixelizeError::BufferSizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self::new_unchecked(width, height, pixels))
    }

    /// Builds a buffer by replacing each palette index with its palette color.
    ///
    /// Every pixel of the result is exactly one of the palette entries.
    pub(crate) fn from_indexed(
        width: u32,
        height: u32,
        palette: &PaletteTable,
        indices: &[u8],
    ) -> Self {
        let palette = palette.colors();
        let pixels = indices
            .iter()
            .map(|&i| palette[usize::from(i)])
            .collect::<Vec<_>>();
        Self::new_unchecked(width, height, pixels)
    }

    /// Returns the width of the buffer in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the buffer in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the `(width, height)` pair.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Srgb<u8>] {
        &self.pixels
    }

    /// Consumes the buffer and returns the pixels in row-major order.
    #[must_use]
    pub fn into_pixels(self) -> Vec<Srgb<u8>> {
        self.pixels
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Srgb<u8> {
        assert!(x < self.width && y < self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(feature = "image")]
impl TryFrom<&RgbImage> for RasterBuffer {
    type Error = PixelizeError;

    fn try_from(image: &RgbImage) -> Result<Self, Self::Error> {
        let pixels = image.pixels().len();
        let buf: &[Srgb<u8>] = image.as_raw()[..(pixels * 3)].components_as();
        Self::new(image.width(), image.height(), buf.to_vec())
    }
}

#[cfg(feature = "image")]
impl RasterBuffer {
    /// Returns the buffer as an [`RgbImage`], suitable for encoding to a
    /// lossless format such as PNG.
    #[must_use]
    pub fn to_rgbimage(&self) -> RgbImage {
        let buf = self.pixels.clone().into_components();

        #[allow(clippy::expect_used)]
        {
            // pixels.len() is equal to width * height by construction,
            // so buf is large enough by nature of its construction
            RgbImage::from_vec(self.width, self.height, buf).expect("large enough buffer")
        }
    }
}
