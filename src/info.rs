use crate::bmp::{self, RowOrder};
use crate::error::BitmapError;

/// Image properties read from the headers alone, without touching pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: u32,
    /// Number of rows, regardless of row order.
    pub height: u32,
    pub row_order: RowOrder,
    /// Bytes per row on disk, including padding.
    pub row_stride: usize,
    /// Zero bytes at the end of each row on disk.
    pub row_padding: usize,
    pub pixel_data_offset: u32,
}

impl BitmapInfo {
    /// Probe a BMP. Fails exactly when decoding would fail on the headers.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let (file, info) = bmp::decode::parse_headers(data)?;
        let width = info.width_px();
        Ok(Self {
            width,
            height: info.height_px(),
            row_order: info.row_order(),
            row_stride: bmp::row_stride(width)?,
            row_padding: bmp::row_padding(width)?,
            pixel_data_offset: file.pixel_data_offset,
        })
    }
}
