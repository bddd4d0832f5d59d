//! Contains dither implementation(s).

use crate::{PaletteTable, RasterBuffer};
use palette::Srgb;

/// Floyd–Steinberg error-diffusion quantization.
///
/// Pixels are processed in strict row-major order. After each pixel snaps to
/// its nearest palette entry, the rounding error spreads to the unprocessed
/// neighbors with the classic kernel weights: `7/16` to the right, `3/16`
/// below-left, `5/16` below, and `1/16` below-right. Shares that would land
/// outside the image are dropped.
///
/// The row-major order is a hard requirement of the algorithm: each pixel's
/// working value depends on the error of previously processed neighbors, so
/// this path is never parallelized.
#[derive(Debug, Clone, Copy)]
pub struct FloydSteinberg(f32);

impl FloydSteinberg {
    /// The default error diffusion factor, diffusing the full error.
    pub const DEFAULT_ERROR_DIFFUSION: f32 = 1.0;

    /// Creates a new [`FloydSteinberg`] with the default error diffusion factor.
    #[must_use]
    pub const fn new() -> Self {
        Self(Self::DEFAULT_ERROR_DIFFUSION)
    }

    /// Creates a new [`FloydSteinberg`] with the given error diffusion factor.
    ///
    /// A factor of `1.0` diffuses all of the error to the neighboring pixels;
    /// smaller factors diffuse only part of it for a tamer dither.
    ///
    /// This will return `None` if `error_diffusion` is not in the range `0.0..=1.0`.
    #[must_use]
    pub fn with_error_diffusion(error_diffusion: f32) -> Option<Self> {
        if (0.0..=1.0).contains(&error_diffusion) {
            Some(Self(error_diffusion))
        } else {
            None
        }
    }

    /// Gets the error diffusion factor for this [`FloydSteinberg`].
    #[must_use]
    pub const fn error_diffusion(&self) -> f32 {
        self.0
    }

    /// Quantizes `buffer` with error diffusion and returns an index into the
    /// palette for each pixel, in row-major order.
    #[must_use]
    pub fn indexed(&self, buffer: &RasterBuffer, palette: &PaletteTable) -> Vec<u8> {
        let &Self(diffusion) = self;
        let (width, height) = buffer.dimensions();
        let (w, h) = (width as usize, height as usize);

        let palette = palette.colors().iter().map(to_point).collect::<Vec<_>>();
        // diffusion mutates a working copy, so the original buffer is left untouched
        let mut working = buffer.pixels().iter().map(to_point).collect::<Vec<_>>();
        let mut indices = vec![0; w * h];

        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let point = working[i];
                let index = nearest_point(&palette, point);
                indices[i] = index;

                let selected = palette[usize::from(index)];
                let err = [
                    diffusion * (point[0] - selected[0]),
                    diffusion * (point[1] - selected[1]),
                    diffusion * (point[2] - selected[2]),
                ];

                if x + 1 < w {
                    diffuse(&mut working[i + 1], 7.0 / 16.0, err);
                }
                if y + 1 < h {
                    if x > 0 {
                        diffuse(&mut working[i + w - 1], 3.0 / 16.0, err);
                    }
                    diffuse(&mut working[i + w], 5.0 / 16.0, err);
                    if x + 1 < w {
                        diffuse(&mut working[i + w + 1], 1.0 / 16.0, err);
                    }
                }
            }
        }

        indices
    }

    /// Quantizes `buffer` with error diffusion, replacing every pixel with a
    /// palette color.
    ///
    /// Every pixel of the result is exactly one of the palette entries.
    #[must_use]
    pub fn remap(&self, buffer: &RasterBuffer, palette: &PaletteTable) -> RasterBuffer {
        let (width, height) = buffer.dimensions();
        RasterBuffer::from_indexed(width, height, palette, &self.indexed(buffer, palette))
    }
}

impl Default for FloydSteinberg {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds a weighted share of `err` to a neighbor's working value, clamping
/// each channel to the representable range before it is later quantized.
#[inline]
fn diffuse(target: &mut [f32; 3], weight: f32, err: [f32; 3]) {
    for c in 0..3 {
        target[c] = (target[c] + weight * err[c]).clamp(0.0, 255.0);
    }
}

/// Returns the index of the palette point nearest to `point`.
///
/// The lowest index wins ties, matching the undithered path.
fn nearest_point(palette: &[[f32; 3]], point: [f32; 3]) -> u8 {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;

    #[allow(clippy::cast_possible_truncation)]
    for (i, entry) in palette.iter().enumerate() {
        let mut distance = 0.0;
        for c in 0..3 {
            let d = point[c] - entry[c];
            distance += d * d;
        }
        if distance < best_distance {
            best = i as u8;
            best_distance = distance;
        }
    }

    best
}

/// Widens a color to per-channel `f32` working values.
fn to_point(color: &Srgb<u8>) -> [f32; 3] {
    [
        f32::from(color.red),
        f32::from(color.green),
        f32::from(color.blue),
    ]
}
