//! Header parsing front end and the row extractor that strips stride padding.

use alloc::vec::Vec;

use enough::Stop;

use super::header::{FileHeader, InfoHeader};
use super::{BYTES_PER_PIXEL, HEADER_SIZE, row_stride};
use crate::error::BitmapError;
use crate::pixel::{Pixel, PixelBuffer};

/// Parse and validate both headers.
///
/// Succeeds only for files whose pixels [`extract`] can read: 40-byte info
/// header, 24 bits per pixel, no compression, positive width, non-zero height,
/// and a pixel data offset that does not overlap the headers.
pub(crate) fn parse_headers(data: &[u8]) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let file = FileHeader::parse(data)?;
    let info = InfoHeader::parse(data)?;
    info.validate()?;
    if (file.pixel_data_offset as usize) < HEADER_SIZE {
        return Err(BitmapError::InvalidPixelOffset(file.pixel_data_offset));
    }

    log::debug!(
        "BMP {}x{} ({:?}), pixel data at {}, file size field {}",
        info.width,
        info.height_px(),
        info.row_order(),
        file.pixel_data_offset,
        file.file_size
    );
    if file.file_size as usize != data.len() {
        log::warn!(
            "BMP file size field {} does not match input length {}",
            file.file_size,
            data.len()
        );
    }
    Ok((file, info))
}

/// Copy each row's `width * 3` pixel bytes out of the padded on-disk rows.
///
/// Rows are read starting at `pixel_data_offset`, one stride apart, and kept
/// in the order they are stored.
pub(crate) fn extract(
    data: &[u8],
    file: &FileHeader,
    info: &InfoHeader,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let width = info.width_px();
    let height = info.height_px();
    let w = width as usize;
    let h = height as usize;

    let stride = row_stride(width)?;
    let row_bytes = w * BYTES_PER_PIXEL;
    let offset = file.pixel_data_offset as usize;

    let expected_size = stride
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if info.image_data_size != 0 && info.image_data_size as usize != expected_size {
        log::warn!(
            "BMP image data size field {} does not match computed {}",
            info.image_data_size,
            expected_size
        );
    }

    // Reject truncated input before allocating for it.
    let last_row_end = stride
        .checked_mul(h - 1)
        .and_then(|s| s.checked_add(offset))
        .and_then(|s| s.checked_add(row_bytes))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if last_row_end > data.len() {
        return Err(BitmapError::OutOfBounds {
            offset: last_row_end - row_bytes,
            len: row_bytes,
            available: data.len(),
        });
    }

    let pixel_count = w
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let mut pixels = Vec::with_capacity(pixel_count);

    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        let start = offset + row * stride;
        let src = data
            .get(start..start + row_bytes)
            .ok_or(BitmapError::OutOfBounds {
                offset: start,
                len: row_bytes,
                available: data.len(),
            })?;
        pixels.extend(src.chunks_exact(BYTES_PER_PIXEL).map(Pixel::from_bgr));
    }

    log::trace!("extracted {} pixels from {} rows", pixels.len(), h);
    Ok(PixelBuffer::from_parts_unchecked(pixels, width, height))
}

/// Bytes after the last padded row, if any.
///
/// Empty when the input ends inside the final row's padding.
pub(crate) fn trailer<'a>(data: &'a [u8], file: &FileHeader, info: &InfoHeader) -> &'a [u8] {
    let end = row_stride(info.width_px())
        .ok()
        .and_then(|stride| stride.checked_mul(info.height_px() as usize))
        .and_then(|size| size.checked_add(file.pixel_data_offset as usize));
    match end.and_then(|end| data.get(end..)) {
        Some(rest) => rest,
        None => &[],
    }
}
