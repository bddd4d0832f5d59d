//! A library for rendering RGB images in a pixel-art style.
//!
//! `pixelize` transforms an image in four fixed stages: brightness/contrast
//! enhancement, block downscaling, quantization to a caller-supplied color
//! palette (optionally with Floyd–Steinberg dithering), and nearest-neighbor
//! upscaling back to the original resolution. The quantized low-resolution
//! buffer is returned alongside the upscaled one, so callers can persist the
//! former and display the latter.
//!
//! # Features
//! To reduce dependencies and compile times, `pixelize` has several `cargo`
//! features that can be turned off or on:
//! - `pipelines`: exposes the builder struct that serves as the high-level API (more details below).
//! - `threads`: exposes parallel versions of the pixel-independent stages via [`rayon`].
//! - `image`: enables integration with the [`image`] crate.
//!
//! # High-Level API
//! To get started with the high-level API, see [`PixelizePipeline`].
//! It has examples in its documentation, but here is an additional example:
//! ```no_run
//! # use pixelize::{PixelizePipeline, PaletteTable, RasterBuffer};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("some image")?.into_rgb8();
//! let input = RasterBuffer::try_from(&img)?;
//!
//! let (palette, warnings) = PaletteTable::from_hex_lines("000000\nffffff\nc86432".lines())?;
//! for warning in warnings {
//!     eprintln!("{warning}");
//! }
//!
//! let output = PixelizePipeline::new(&input, &palette)
//!     .block_size(8) // edge length of the square sampled per output pixel
//!     .dither(true)
//!     .run()?;
//!
//! output.export.to_rgbimage().save("pixelized.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! Note that some of the options and functions above require certain features to be enabled.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal
)]

mod dither;
mod palette_table;
mod types;

pub mod adjust;
pub mod quantize;
pub mod resize;

#[cfg(feature = "pipelines")]
mod api;

pub use dither::FloydSteinberg;
pub use palette_table::*;
pub use types::*;

#[cfg(feature = "pipelines")]
pub use api::*;

/// The maximum supported number of palette colors is `256`.
pub const MAX_COLORS: u16 = u8::MAX as u16 + 1;

/// The maximum supported pixelization block size is `100`.
pub const MAX_BLOCK_SIZE: u32 = 100;

/// `MAX_COLORS` as a `usize` for array and `Vec` lengths.
pub(crate) const MAX_K: usize = MAX_COLORS as usize;
