//! Brightness and contrast enhancement.
//!
//! Contrast interpolates each channel toward or away from the mean gray
//! level of the image; brightness scales each channel. Both stages clamp to
//! the 8-bit range and a factor of exactly `1.0` leaves a stage's input
//! untouched.

use crate::RasterBuffer;
use palette::Srgb;
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Applies contrast and then brightness enhancement to `buffer`.
///
/// Factors are expected to lie in `0.5..=2.0` with `1.0` as the identity;
/// range validation is the caller's responsibility.
#[must_use]
pub fn adjust(buffer: RasterBuffer, contrast: f32, brightness: f32) -> RasterBuffer {
    let buffer = apply_contrast(buffer, contrast);
    apply_brightness(buffer, brightness)
}

/// Applies contrast and then brightness enhancement to `buffer` in parallel.
///
/// Produces the same result as [`adjust`].
#[cfg(feature = "threads")]
#[must_use]
pub fn adjust_par(buffer: RasterBuffer, contrast: f32, brightness: f32) -> RasterBuffer {
    let buffer = apply_contrast_par(buffer, contrast);
    apply_brightness_par(buffer, brightness)
}

/// Interpolates each channel toward the image's mean gray level.
#[allow(clippy::float_cmp)]
fn apply_contrast(buffer: RasterBuffer, factor: f32) -> RasterBuffer {
    if factor == 1.0 {
        return buffer;
    }

    let mean = mean_gray(buffer.pixels());
    map_pixels(buffer, |c| mean + factor * (f32::from(c) - mean))
}

/// Scales each channel by the brightness factor.
#[allow(clippy::float_cmp)]
fn apply_brightness(buffer: RasterBuffer, factor: f32) -> RasterBuffer {
    if factor == 1.0 {
        return buffer;
    }

    map_pixels(buffer, |c| factor * f32::from(c))
}

/// Parallel version of [`apply_contrast`].
#[cfg(feature = "threads")]
#[allow(clippy::float_cmp)]
fn apply_contrast_par(buffer: RasterBuffer, factor: f32) -> RasterBuffer {
    if factor == 1.0 {
        return buffer;
    }

    let mean = mean_gray_par(buffer.pixels());
    map_pixels_par(buffer, |c| mean + factor * (f32::from(c) - mean))
}

/// Parallel version of [`apply_brightness`].
#[cfg(feature = "threads")]
#[allow(clippy::float_cmp)]
fn apply_brightness_par(buffer: RasterBuffer, factor: f32) -> RasterBuffer {
    if factor == 1.0 {
        return buffer;
    }

    map_pixels_par(buffer, |c| factor * f32::from(c))
}

/// The mean ITU-R 601 luma of the pixels, rounded to the nearest integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn mean_gray(pixels: &[Srgb<u8>]) -> f32 {
    let sum = pixels.iter().copied().map(luma).sum::<f64>();
    (sum / pixels.len() as f64).round() as f32
}

/// Parallel version of [`mean_gray`].
#[cfg(feature = "threads")]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn mean_gray_par(pixels: &[Srgb<u8>]) -> f32 {
    let sum = pixels.par_iter().copied().map(luma).sum::<f64>();
    (sum / pixels.len() as f64).round() as f32
}

/// ITU-R 601 luma of a color.
fn luma(color: Srgb<u8>) -> f64 {
    let r = f64::from(color.red);
    let g = f64::from(color.green);
    let b = f64::from(color.blue);
    (299.0 * r + 587.0 * g + 114.0 * b) / 1000.0
}

/// Applies `f` to every channel of every pixel, rounding back to 8 bits.
fn map_pixels(buffer: RasterBuffer, f: impl Fn(u8) -> f32) -> RasterBuffer {
    let (width, height) = buffer.dimensions();
    let pixels = buffer
        .into_pixels()
        .into_iter()
        .map(|p| map_color(p, &f))
        .collect();
    RasterBuffer::new_unchecked(width, height, pixels)
}

/// Parallel version of [`map_pixels`].
#[cfg(feature = "threads")]
fn map_pixels_par(buffer: RasterBuffer, f: impl Fn(u8) -> f32 + Send + Sync) -> RasterBuffer {
    let (width, height) = buffer.dimensions();
    let pixels = buffer
        .into_pixels()
        .into_par_iter()
        .map(|p| map_color(p, &f))
        .collect();
    RasterBuffer::new_unchecked(width, height, pixels)
}

/// Applies `f` to each channel of `color`.
fn map_color(color: Srgb<u8>, f: &impl Fn(u8) -> f32) -> Srgb<u8> {
    Srgb::new(
        to_channel(f(color.red)),
        to_channel(f(color.green)),
        to_channel(f(color.blue)),
    )
}

/// Rounds an enhanced channel value back to the 8-bit range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
