//! Nearest-palette-color quantization.
//!
//! Every pixel maps independently to the palette entry with the smallest
//! squared Euclidean distance in RGB space. When several entries are
//! equidistant, the entry with the lowest index wins, so palette order is
//! significant. For error-diffusion quantization see
//! [`FloydSteinberg`](crate::FloydSteinberg).

use crate::{PaletteTable, RasterBuffer};
use palette::Srgb;
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Squared Euclidean distance between two colors in RGB space.
fn squared_distance(x: Srgb<u8>, y: Srgb<u8>) -> u32 {
    let dr = i32::from(x.red) - i32::from(y.red);
    let dg = i32::from(x.green) - i32::from(y.green);
    let db = i32::from(x.blue) - i32::from(y.blue);

    #[allow(clippy::cast_sign_loss)]
    {
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Returns the index of the palette entry nearest to `color`.
///
/// The lowest index wins ties.
pub(crate) fn nearest(palette: &[Srgb<u8>], color: Srgb<u8>) -> u8 {
    let mut best = 0;
    let mut best_distance = u32::MAX;

    #[allow(clippy::cast_possible_truncation)]
    for (i, &entry) in palette.iter().enumerate() {
        let distance = squared_distance(entry, color);
        if distance < best_distance {
            best = i as u8;
            best_distance = distance;
        }
    }

    best
}

/// Quantizes `buffer` and returns an index into the palette for each pixel,
/// in row-major order.
#[must_use]
pub fn indexed(buffer: &RasterBuffer, palette: &PaletteTable) -> Vec<u8> {
    let palette = palette.colors();
    buffer.pixels().iter().map(|&p| nearest(palette, p)).collect()
}

/// Quantizes `buffer` in parallel and returns an index into the palette for
/// each pixel, in row-major order.
///
/// Produces the same result as [`indexed`]: each pixel depends only on its
/// own value and the read-only palette.
#[cfg(feature = "threads")]
#[must_use]
pub fn indexed_par(buffer: &RasterBuffer, palette: &PaletteTable) -> Vec<u8> {
    let palette = palette.colors();
    buffer
        .pixels()
        .par_iter()
        .map(|&p| nearest(palette, p))
        .collect()
}

/// Quantizes `buffer`, replacing every pixel with its nearest palette color.
///
/// Every pixel of the result is exactly one of the palette entries.
#[must_use]
pub fn remap(buffer: &RasterBuffer, palette: &PaletteTable) -> RasterBuffer {
    let (width, height) = buffer.dimensions();
    RasterBuffer::from_indexed(width, height, palette, &indexed(buffer, palette))
}
