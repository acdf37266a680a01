//! Uncompressed 24-bit BMP: header codec, row geometry, pixel extraction and
//! the padded-row writer.
//!
//! Use the top-level [`crate::DecodeRequest`] and [`crate::Bitmap`] rather than
//! these functions directly.

pub(crate) mod decode;
pub(crate) mod encode;
pub mod header;

pub use header::{FileHeader, InfoHeader};

use crate::error::BitmapError;

/// `"BM"` read as a little-endian `u16`.
pub const SIGNATURE: u16 = 0x4D42;
/// Size of the BITMAPFILEHEADER.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the Windows BITMAPINFOHEADER, the only info header accepted.
pub const INFO_HEADER_SIZE: usize = 40;
/// Both headers; also the smallest valid pixel data offset.
pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// The only supported bit depth.
pub const BITS_PER_PIXEL: u16 = 24;
pub const BYTES_PER_PIXEL: usize = 3;
/// `BI_RGB`.
pub const COMPRESSION_NONE: u32 = 0;
/// 72 DPI, written into freshly built headers.
pub const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// On-disk row order, signalled by the sign of the header height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Positive height: first stored row is the bottom of the image.
    BottomUp,
    /// Negative height: first stored row is the top of the image.
    TopDown,
}

impl RowOrder {
    pub fn from_height(height: i32) -> Self {
        if height < 0 {
            RowOrder::TopDown
        } else {
            RowOrder::BottomUp
        }
    }
}

/// Bytes occupied by one row on disk, rounded up to a multiple of 4.
pub fn row_stride(width: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
        .ok_or(BitmapError::DimensionsTooLarge { width, height: 0 })
}

/// Zero bytes appended to each row to reach [`row_stride`]; always 0..=3.
pub fn row_padding(width: u32) -> Result<usize, BitmapError> {
    Ok(row_stride(width)? - width as usize * BYTES_PER_PIXEL)
}

/// Size of the pixel array on disk: `row_stride(width) * height`.
pub fn image_data_size(width: u32, height: u32) -> Result<usize, BitmapError> {
    row_stride(width)?
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_multiple_of_four() {
        for w in 1..64u32 {
            let stride = row_stride(w).unwrap();
            assert_eq!(stride % 4, 0, "width {w}");
            assert!(stride >= w as usize * 3);
        }
    }

    #[test]
    fn padding_matches_closed_form() {
        for w in 1..64u32 {
            let pad = row_padding(w).unwrap();
            assert!(pad <= 3);
            assert_eq!(pad, (4 - (w as usize * 3) % 4) % 4, "width {w}");
        }
    }

    #[test]
    fn known_paddings() {
        assert_eq!(row_padding(4).unwrap(), 0);
        assert_eq!(row_padding(5).unwrap(), 1);
        assert_eq!(row_padding(2).unwrap(), 2);
        assert_eq!(row_padding(1).unwrap(), 1);
        assert_eq!(row_padding(3).unwrap(), 3);
        assert_eq!(row_stride(5).unwrap(), 16);
    }

    #[test]
    fn image_size_multiplies_stride() {
        assert_eq!(image_data_size(5, 3).unwrap(), 48);
        assert_eq!(image_data_size(4, 2).unwrap(), 24);
    }

    #[test]
    fn row_order_follows_height_sign() {
        assert_eq!(RowOrder::from_height(10), RowOrder::BottomUp);
        assert_eq!(RowOrder::from_height(-10), RowOrder::TopDown);
    }
}
