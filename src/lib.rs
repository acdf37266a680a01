//! # zenbmp
//!
//! Decoder and encoder for uncompressed 24-bit Windows bitmaps, with two
//! pixel transforms: red/blue channel swap and 2x nearest-neighbour downscale.
//!
//! ## Lossless Round Trip
//!
//! Decoding keeps the raw header region (everything before the first pixel
//! row) next to the parsed headers. Encoding an untouched [`Bitmap`] writes
//! that region back verbatim and re-pads the rows with zeros, so the output
//! is byte-identical to the input. [`Bitmap::downscale_half`] is the only
//! operation that rewrites header fields (width, height, image data size,
//! file size).
//!
//! ## Row Order
//!
//! Rows are kept in the order they are stored on disk. A positive header
//! height means bottom-up storage; the buffer is *not* flipped. Use
//! [`transform::flip_rows`] if top-down rows are needed.
//!
//! ## Supported Input
//!
//! - 14-byte file header with the `BM` signature
//! - 40-byte BITMAPINFOHEADER
//! - 24 bits per pixel, `BI_RGB` (uncompressed)
//!
//! ## Non-Goals
//!
//! - RLE or bitfield compression
//! - Bit depths other than 24, palettes
//! - ICC profiles
//! - Resampling beyond nearest-neighbour halving
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{DecodeRequest, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! let mut bitmap = DecodeRequest::new(data).decode(Unstoppable)?;
//! bitmap.swap_red_blue();
//! bitmap.downscale_half()?;
//! let encoded = bitmap.encode(Unstoppable)?;
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;
pub mod transform;

mod decode;

use alloc::vec::Vec;

// Re-exports
pub use bmp::RowOrder;
pub use decode::{Bitmap, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use info::BitmapInfo;
pub use limits::Limits;
pub use pixel::{Pixel, PixelBuffer};

/// Decode a 24-bit BMP with no limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a pixel buffer as a new 24-bit BMP with default headers.
///
/// The buffer's first row is stored first; the header height is positive.
pub fn encode_bmp(pixels: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode::encode_bmp(pixels, &stop)
}
