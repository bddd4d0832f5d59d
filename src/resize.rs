//! Nearest-neighbor resampling.
//!
//! Resizing samples source pixels directly, without interpolation or
//! averaging, preserving the hard block edges that define the pixel-art
//! look. The same routine serves both the downscale-for-pixelization step
//! and the upscale-for-display step.

use crate::RasterBuffer;

/// Resizes `source` to `target_width x target_height` by nearest-neighbor
/// sampling.
///
/// Output pixel `(x, y)` samples the source pixel at
/// `(x * src_w / target_w, y * src_h / target_h)`, with flooring integer
/// arithmetic. Both target dimensions must be at least `1`.
#[must_use]
pub fn resize_nearest(source: &RasterBuffer, target_width: u32, target_height: u32) -> RasterBuffer {
    assert!(target_width >= 1 && target_height >= 1);

    let (src_w, src_h) = source.dimensions();
    let src = source.pixels();

    let (sw, sh) = (src_w as usize, src_h as usize);
    let (tw, th) = (target_width as usize, target_height as usize);

    let mut pixels = Vec::with_capacity(tw * th);
    for y in 0..th {
        let sy = y * sh / th;
        let row = &src[(sy * sw)..((sy + 1) * sw)];
        for x in 0..tw {
            pixels.push(row[x * sw / tw]);
        }
    }

    RasterBuffer::new_unchecked(target_width, target_height, pixels)
}

/// Returns the dimensions of the pixelization grid for an image of
/// `width x height` sampled in `block_size`-pixel square blocks.
///
/// Each dimension is divided by `block_size` and floored, but never drops
/// below `1`, so images smaller than one block still pixelize to a single
/// pixel. `block_size` must be at least `1`.
#[must_use]
pub fn pixelized_dimensions(width: u32, height: u32, block_size: u32) -> (u32, u32) {
    assert!(block_size >= 1);
    ((width / block_size).max(1), (height / block_size).max(1))
}
