//! BITMAPFILEHEADER and BITMAPINFOHEADER, decoded and encoded field by field
//! at fixed little-endian offsets.

use super::{
    BITS_PER_PIXEL, COMPRESSION_NONE, DEFAULT_PIXELS_PER_METER, FILE_HEADER_SIZE, HEADER_SIZE,
    INFO_HEADER_SIZE, SIGNATURE,
};
use crate::error::BitmapError;

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn put(out: &mut [u8], off: usize, bytes: &[u8]) {
    out[off..off + bytes.len()].copy_from_slice(bytes);
}

/// The 14-byte file header at the start of every BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Always [`SIGNATURE`] after a successful parse.
    pub signature: u16,
    /// Total file size as recorded in the header.
    pub file_size: u32,
    /// Byte offset from the start of the file to the first pixel row.
    pub pixel_data_offset: u32,
}

impl FileHeader {
    /// Parse bytes 0..14.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let b = data.get(..FILE_HEADER_SIZE).ok_or(BitmapError::UnexpectedEof)?;
        let signature = u16_at(b, 0);
        if signature != SIGNATURE {
            return Err(BitmapError::NotBmp);
        }
        // 6..10: two reserved u16, ignored
        Ok(Self {
            signature,
            file_size: u32_at(b, 2),
            pixel_data_offset: u32_at(b, 10),
        })
    }

    /// Serialize; reserved fields are written as zero.
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        put(&mut out, 0, &self.signature.to_le_bytes());
        put(&mut out, 2, &self.file_size.to_le_bytes());
        put(&mut out, 10, &self.pixel_data_offset.to_le_bytes());
        out
    }
}

/// The 40-byte Windows info header (BITMAPINFOHEADER).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive: bottom-up rows. Negative: top-down rows.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Size of the pixel array, excluding headers. May be 0 for `BI_RGB`.
    pub image_data_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    /// Parse bytes 14..54 of the file.
    ///
    /// Only the header size is checked here; bit depth and compression are
    /// checked by [`InfoHeader::validate`] before any pixel is read.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        let header_size = data
            .get(FILE_HEADER_SIZE..FILE_HEADER_SIZE + 4)
            .map(|b| u32_at(b, 0))
            .ok_or(BitmapError::UnexpectedEof)?;
        if header_size as usize != INFO_HEADER_SIZE {
            return Err(BitmapError::UnsupportedHeader(header_size));
        }
        let b = data
            .get(FILE_HEADER_SIZE..HEADER_SIZE)
            .ok_or(BitmapError::UnexpectedEof)?;
        Ok(Self {
            header_size,
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_data_size: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        })
    }

    /// A header for a fresh bottom-up 24-bit image.
    pub fn new_24bit(width: u32, height: u32) -> Result<Self, BitmapError> {
        let w = i32::try_from(width).map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
        let h =
            i32::try_from(height).map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
        let size = super::image_data_size(width, height)?;
        let image_data_size =
            u32::try_from(size).map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            header_size: INFO_HEADER_SIZE as u32,
            width: w,
            height: h,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
            image_data_size,
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            colors_used: 0,
            colors_important: 0,
        })
    }

    /// Reject anything this codec cannot extract.
    pub fn validate(&self) -> Result<(), BitmapError> {
        if self.bits_per_pixel != BITS_PER_PIXEL {
            return Err(BitmapError::UnsupportedBitDepth(self.bits_per_pixel));
        }
        if self.compression != COMPRESSION_NONE {
            return Err(BitmapError::UnsupportedCompression(self.compression));
        }
        if self.width <= 0 || self.height == 0 {
            return Err(BitmapError::geometry(self.width, self.height));
        }
        if self.planes != 1 {
            log::warn!("BMP planes field is {}, expected 1", self.planes);
        }
        Ok(())
    }

    /// Width in pixels. Only meaningful after [`InfoHeader::validate`].
    pub fn width_px(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Number of rows, regardless of row order.
    pub fn height_px(&self) -> u32 {
        self.height.unsigned_abs()
    }

    pub fn row_order(&self) -> super::RowOrder {
        super::RowOrder::from_height(self.height)
    }

    /// Serialize at file-relative offsets 14..54.
    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        put(&mut out, 0, &self.header_size.to_le_bytes());
        put(&mut out, 4, &self.width.to_le_bytes());
        put(&mut out, 8, &self.height.to_le_bytes());
        put(&mut out, 12, &self.planes.to_le_bytes());
        put(&mut out, 14, &self.bits_per_pixel.to_le_bytes());
        put(&mut out, 16, &self.compression.to_le_bytes());
        put(&mut out, 20, &self.image_data_size.to_le_bytes());
        put(&mut out, 24, &self.x_pixels_per_meter.to_le_bytes());
        put(&mut out, 28, &self.y_pixels_per_meter.to_le_bytes());
        put(&mut out, 32, &self.colors_used.to_le_bytes());
        put(&mut out, 36, &self.colors_important.to_le_bytes());
        out
    }
}

/// Both headers serialized back to back, as they sit at the start of a file.
pub(crate) fn headers_to_bytes(file: &FileHeader, info: &InfoHeader) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    out[..FILE_HEADER_SIZE].copy_from_slice(&file.to_bytes());
    out[FILE_HEADER_SIZE..].copy_from_slice(&info.to_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> [u8; HEADER_SIZE] {
        let mut b = [0u8; HEADER_SIZE];
        b[0..2].copy_from_slice(b"BM");
        b[2..6].copy_from_slice(&102u32.to_le_bytes());
        b[10..14].copy_from_slice(&54u32.to_le_bytes());
        b[14..18].copy_from_slice(&40u32.to_le_bytes());
        b[18..22].copy_from_slice(&5i32.to_le_bytes());
        b[22..26].copy_from_slice(&(-3i32).to_le_bytes());
        b[26..28].copy_from_slice(&1u16.to_le_bytes());
        b[28..30].copy_from_slice(&24u16.to_le_bytes());
        b[34..38].copy_from_slice(&48u32.to_le_bytes());
        b[38..42].copy_from_slice(&3780i32.to_le_bytes());
        b[42..46].copy_from_slice(&(-1i32).to_le_bytes());
        b[46..50].copy_from_slice(&7u32.to_le_bytes());
        b[50..54].copy_from_slice(&9u32.to_le_bytes());
        b
    }

    #[test]
    fn parses_every_field_at_its_offset() {
        let b = sample();
        let fh = FileHeader::parse(&b).unwrap();
        assert_eq!(fh.signature, SIGNATURE);
        assert_eq!(fh.file_size, 102);
        assert_eq!(fh.pixel_data_offset, 54);

        let ih = InfoHeader::parse(&b).unwrap();
        assert_eq!(ih.header_size, 40);
        assert_eq!(ih.width, 5);
        assert_eq!(ih.height, -3);
        assert_eq!(ih.planes, 1);
        assert_eq!(ih.bits_per_pixel, 24);
        assert_eq!(ih.compression, 0);
        assert_eq!(ih.image_data_size, 48);
        assert_eq!(ih.x_pixels_per_meter, 3780);
        assert_eq!(ih.y_pixels_per_meter, -1);
        assert_eq!(ih.colors_used, 7);
        assert_eq!(ih.colors_important, 9);
        assert_eq!(ih.height_px(), 3);
        assert_eq!(ih.row_order(), crate::bmp::RowOrder::TopDown);
    }

    #[test]
    fn serializes_back_to_the_same_bytes() {
        let b = sample();
        let fh = FileHeader::parse(&b).unwrap();
        let ih = InfoHeader::parse(&b).unwrap();
        assert_eq!(headers_to_bytes(&fh, &ih), b);
    }

    #[test]
    fn reserved_fields_are_zeroed_on_write() {
        let mut b = sample();
        b[6] = 0xAA;
        b[9] = 0x55;
        let fh = FileHeader::parse(&b).unwrap();
        assert_eq!(&fh.to_bytes()[6..10], &[0, 0, 0, 0]);
    }

    #[test]
    fn wrong_signature_is_not_bmp() {
        let mut b = sample();
        b[0] = 0;
        b[1] = 0;
        assert!(matches!(FileHeader::parse(&b), Err(BitmapError::NotBmp)));
    }

    #[test]
    fn other_info_header_sizes_are_rejected() {
        let mut b = sample();
        b[14..18].copy_from_slice(&108u32.to_le_bytes());
        assert!(matches!(
            InfoHeader::parse(&b),
            Err(BitmapError::UnsupportedHeader(108))
        ));
    }

    #[test]
    fn truncated_headers_are_eof() {
        let b = sample();
        assert!(matches!(
            FileHeader::parse(&b[..10]),
            Err(BitmapError::UnexpectedEof)
        ));
        assert!(matches!(
            InfoHeader::parse(&b[..40]),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    #[test]
    fn validate_rejects_unsupported_pixels() {
        let mut ih = InfoHeader::parse(&sample()).unwrap();
        ih.bits_per_pixel = 32;
        assert!(matches!(
            ih.validate(),
            Err(BitmapError::UnsupportedBitDepth(32))
        ));
        ih.bits_per_pixel = 24;
        ih.compression = 1;
        assert!(matches!(
            ih.validate(),
            Err(BitmapError::UnsupportedCompression(1))
        ));
        ih.compression = 0;
        ih.width = 0;
        assert!(matches!(
            ih.validate(),
            Err(BitmapError::InvalidGeometry { .. })
        ));
        ih.width = 5;
        ih.height = 0;
        assert!(matches!(
            ih.validate(),
            Err(BitmapError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn fresh_header_describes_the_pixel_array() {
        let ih = InfoHeader::new_24bit(5, 3).unwrap();
        assert_eq!(ih.image_data_size, 48);
        assert_eq!(ih.height, 3);
        assert!(ih.validate().is_ok());
    }
}
