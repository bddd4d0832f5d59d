//! Contains the [`PixelizePipeline`] builder struct for the high level API.

use crate::{
    adjust, quantize, resize, FloydSteinberg, PaletteTable, PixelizeConfig, PixelizeError,
    RasterBuffer,
};

/// A builder struct to specify options to render an image in a pixel-art style.
///
/// # Examples
/// To start, create a [`PixelizePipeline`] from a [`RasterBuffer`] and a
/// [`PaletteTable`]:
/// ```
/// # use pixelize::{PaletteTable, PixelizePipeline, RasterBuffer};
/// # use palette::Srgb;
/// # fn main() -> Result<(), pixelize::PixelizeError> {
/// # let input = RasterBuffer::new(1, 1, vec![Srgb::new(0, 0, 0)])?;
/// # let palette = PaletteTable::new(vec![Srgb::new(0, 0, 0)])?;
/// let mut pipeline = PixelizePipeline::new(&input, &palette);
/// # Ok(())
/// # }
/// ```
///
/// Then, you can change different options like the block size or the
/// enhancement factors:
/// ```
/// # use pixelize::{PaletteTable, PixelizePipeline, RasterBuffer};
/// # use palette::Srgb;
/// # fn main() -> Result<(), pixelize::PixelizeError> {
/// # let input = RasterBuffer::new(1, 1, vec![Srgb::new(0, 0, 0)])?;
/// # let palette = PaletteTable::new(vec![Srgb::new(0, 0, 0)])?;
/// let mut pipeline = PixelizePipeline::new(&input, &palette);
/// let pipeline = pipeline
///     .contrast(1.2)
///     .brightness(0.9)
///     .block_size(8)
///     .dither(false);
/// # Ok(())
/// # }
/// ```
///
/// Finally, run the pipeline:
/// ```
/// # use pixelize::{PaletteTable, PixelizePipeline, RasterBuffer};
/// # use palette::Srgb;
/// # fn main() -> Result<(), pixelize::PixelizeError> {
/// # let input = RasterBuffer::new(1, 1, vec![Srgb::new(0, 0, 0)])?;
/// # let palette = PaletteTable::new(vec![Srgb::new(0, 0, 0)])?;
/// let output = PixelizePipeline::new(&input, &palette).run()?;
/// let quantized = output.export; // native pixelized resolution, for persistence
/// let upscaled = output.display; // input resolution, for display
/// # Ok(())
/// # }
/// ```
///
/// Or, in parallel across multiple threads (needs the `threads` feature):
/// ```
/// # use pixelize::{PaletteTable, PixelizePipeline, RasterBuffer};
/// # use palette::Srgb;
/// # fn main() -> Result<(), pixelize::PixelizeError> {
/// # let input = RasterBuffer::new(1, 1, vec![Srgb::new(0, 0, 0)])?;
/// # let palette = PaletteTable::new(vec![Srgb::new(0, 0, 0)])?;
/// let output = PixelizePipeline::new(&input, &palette).run_par()?;
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct PixelizePipeline<'a> {
    /// The input image.
    image: &'a RasterBuffer,
    /// The palette to quantize to.
    palette: &'a PaletteTable,
    /// The options for this run.
    config: PixelizeConfig,
    /// Whether to skip all processing and return the unmodified input.
    passthrough: bool,
}

/// The two buffers produced by a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelizeOutput {
    /// The quantized image at its native (downscaled) resolution.
    ///
    /// Every pixel is exactly one of the palette entries; this is the buffer
    /// to encode and persist.
    pub export: RasterBuffer,
    /// The quantized image upscaled back to the input resolution, for display.
    ///
    /// Upscaling reuses the exact pixel values of [`export`](Self::export).
    pub display: RasterBuffer,
}

impl<'a> PixelizePipeline<'a> {
    /// Creates a new [`PixelizePipeline`] with default options.
    pub fn new(image: &'a RasterBuffer, palette: &'a PaletteTable) -> Self {
        Self {
            image,
            palette,
            config: PixelizeConfig::new(),
            passthrough: false,
        }
    }

    /// Replaces the whole option bundle at once.
    pub fn config(&mut self, config: PixelizeConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Sets the contrast factor, expected in `0.5..=2.0`.
    ///
    /// The default value is `1.0` (no change).
    pub fn contrast(&mut self, contrast: f32) -> &mut Self {
        self.config.contrast = contrast;
        self
    }

    /// Sets the brightness factor, expected in `0.5..=2.0`.
    ///
    /// The default value is `1.0` (no change).
    pub fn brightness(&mut self, brightness: f32) -> &mut Self {
        self.config.brightness = brightness;
        self
    }

    /// Sets the pixelization block size, expected in
    /// `1..=`[`MAX_BLOCK_SIZE`](crate::MAX_BLOCK_SIZE).
    ///
    /// The default value is `4`.
    pub fn block_size(&mut self, block_size: u32) -> &mut Self {
        self.config.block_size = block_size;
        self
    }

    /// Sets whether to apply Floyd–Steinberg dithering during quantization.
    ///
    /// The default value is `true`.
    pub fn dither(&mut self, dither: bool) -> &mut Self {
        self.config.dither = dither;
        self
    }

    /// Sets whether to skip all processing and return copies of the
    /// unmodified input as both output buffers.
    ///
    /// Callers use this to toggle a before/after view without rebuilding the
    /// pipeline.
    ///
    /// The default value is `false`.
    pub fn passthrough(&mut self, passthrough: bool) -> &mut Self {
        self.passthrough = passthrough;
        self
    }

    /// Runs the pipeline: enhancement, block downscale, palette
    /// quantization, and display upscale, in that order.
    ///
    /// Enhancement runs at full resolution so the contrast gray mean is
    /// computed from every input pixel, and the display buffer is upscaled
    /// from the already-quantized export buffer.
    ///
    /// # Errors
    /// Returns an error if an option is outside its supported range. No
    /// partial output is produced.
    pub fn run(&self) -> Result<PixelizeOutput, PixelizeError> {
        self.config.validate()?;

        if self.passthrough {
            return Ok(PixelizeOutput {
                export: self.image.clone(),
                display: self.image.clone(),
            });
        }

        let PixelizeConfig { contrast, brightness, block_size, dither } = self.config;
        let (width, height) = self.image.dimensions();

        let adjusted = adjust::adjust(self.image.clone(), contrast, brightness);

        let (small_w, small_h) = resize::pixelized_dimensions(width, height, block_size);
        let small = resize::resize_nearest(&adjusted, small_w, small_h);

        let indices = if dither {
            FloydSteinberg::new().indexed(&small, self.palette)
        } else {
            quantize::indexed(&small, self.palette)
        };

        let export = RasterBuffer::from_indexed(small_w, small_h, self.palette, &indices);
        let display = resize::resize_nearest(&export, width, height);

        Ok(PixelizeOutput { export, display })
    }

    /// Runs the pipeline in parallel.
    ///
    /// Produces the same output as [`run`](Self::run). Only the
    /// pixel-independent stages are parallelized; the dithered quantization
    /// path keeps its strict row-major order on a single thread.
    ///
    /// # Errors
    /// Returns an error if an option is outside its supported range.
    #[cfg(feature = "threads")]
    pub fn run_par(&self) -> Result<PixelizeOutput, PixelizeError> {
        self.config.validate()?;

        if self.passthrough {
            return Ok(PixelizeOutput {
                export: self.image.clone(),
                display: self.image.clone(),
            });
        }

        let PixelizeConfig { contrast, brightness, block_size, dither } = self.config;
        let (width, height) = self.image.dimensions();

        let adjusted = adjust::adjust_par(self.image.clone(), contrast, brightness);

        let (small_w, small_h) = resize::pixelized_dimensions(width, height, block_size);
        let small = resize::resize_nearest(&adjusted, small_w, small_h);

        let indices = if dither {
            FloydSteinberg::new().indexed(&small, self.palette)
        } else {
            quantize::indexed_par(&small, self.palette)
        };

        let export = RasterBuffer::from_indexed(small_w, small_h, self.palette, &indices);
        let display = resize::resize_nearest(&export, width, height);

        Ok(PixelizeOutput { export, display })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;
    use palette::Srgb;

    #[test]
    fn uniform_image_maps_to_its_exact_palette_entry() {
        let target = Srgb::new(200, 100, 50);
        let input = uniform_buffer(4, 4, target);
        let palette =
            PaletteTable::new(vec![gray(0), gray(255), target]).unwrap();

        let output = PixelizePipeline::new(&input, &palette)
            .block_size(2)
            .dither(false)
            .run()
            .unwrap();

        assert_eq!(output.export.dimensions(), (2, 2));
        assert!(output.export.pixels().iter().all(|&p| p == target));
        assert_eq!(output.display, input);
    }

    #[test]
    fn display_keeps_input_dimensions() {
        let input = gradient_buffer(13, 7);
        let palette = bw_palette();

        let output = PixelizePipeline::new(&input, &palette)
            .block_size(4)
            .run()
            .unwrap();

        assert_eq!(output.export.dimensions(), (3, 1));
        assert_eq!(output.display.dimensions(), (13, 7));
    }

    #[test]
    fn export_pixels_are_palette_members() {
        let input = gradient_buffer(20, 10);
        let palette = bw_palette();

        for dither in [false, true] {
            let output = PixelizePipeline::new(&input, &palette)
                .block_size(3)
                .dither(dither)
                .run()
                .unwrap();

            assert!(output
                .export
                .pixels()
                .iter()
                .all(|p| palette.colors().contains(p)));
            assert!(output
                .display
                .pixels()
                .iter()
                .all(|p| palette.colors().contains(p)));
        }
    }

    #[test]
    fn display_is_upscaled_from_the_export_buffer() {
        let input = gradient_buffer(8, 8);
        let palette = bw_palette();

        let output = PixelizePipeline::new(&input, &palette)
            .block_size(2)
            .run()
            .unwrap();

        assert_eq!(
            output.display,
            crate::resize::resize_nearest(&output.export, 8, 8)
        );
    }

    #[test]
    fn passthrough_returns_the_unmodified_input() {
        let input = gradient_buffer(6, 6);
        let palette = bw_palette();

        let output = PixelizePipeline::new(&input, &palette)
            .contrast(2.0)
            .brightness(0.5)
            .block_size(3)
            .passthrough(true)
            .run()
            .unwrap();

        assert_eq!(output.export, input);
        assert_eq!(output.display, input);
    }

    #[test]
    fn out_of_range_block_size_is_fatal() {
        let input = gradient_buffer(4, 4);
        let palette = bw_palette();

        for block_size in [0, 101] {
            let err = PixelizePipeline::new(&input, &palette)
                .block_size(block_size)
                .run()
                .unwrap_err();
            assert_eq!(err, PixelizeError::BlockSizeOutOfRange(block_size));
        }
    }

    #[test]
    fn out_of_range_factors_are_fatal() {
        let input = gradient_buffer(4, 4);
        let palette = bw_palette();

        let err = PixelizePipeline::new(&input, &palette)
            .contrast(2.5)
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            PixelizeError::EnhancementOutOfRange { enhancement: "contrast", factor: 2.5 }
        );

        let err = PixelizePipeline::new(&input, &palette)
            .brightness(0.4)
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            PixelizeError::EnhancementOutOfRange { enhancement: "brightness", factor: 0.4 }
        );
    }

    #[test]
    fn validation_failures_also_abort_passthrough_runs() {
        let input = gradient_buffer(4, 4);
        let palette = bw_palette();

        assert!(PixelizePipeline::new(&input, &palette)
            .block_size(0)
            .passthrough(true)
            .run()
            .is_err());
    }

    #[test]
    fn whole_config_bundle_can_be_replaced() {
        let input = gradient_buffer(8, 8);
        let palette = bw_palette();
        let config = PixelizeConfig::new().block_size(8).dither(false);

        let output = PixelizePipeline::new(&input, &palette)
            .config(config)
            .run()
            .unwrap();
        assert_eq!(output.export.dimensions(), (1, 1));
    }

    #[cfg(feature = "threads")]
    #[test]
    fn parallel_matches_sequential() {
        let input = gradient_buffer(32, 24);
        let palette = bw_palette();

        for dither in [false, true] {
            let mut pipeline = PixelizePipeline::new(&input, &palette);
            let pipeline = pipeline.contrast(1.3).brightness(0.8).dither(dither);
            assert_eq!(pipeline.run_par().unwrap(), pipeline.run().unwrap());
        }
    }
}
