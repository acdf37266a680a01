//! BMP writer: header region followed by zero-padded 24-bit rows.

use alloc::vec::Vec;

use enough::Stop;

use super::header::{FileHeader, InfoHeader, headers_to_bytes};
use super::{HEADER_SIZE, row_padding, row_stride};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Emit a complete file from a retained header region and a pixel buffer.
///
/// The first `pixel_data_offset` bytes of `header_region` are copied as-is,
/// rows follow in buffer order, then `trailer` (bytes that sat after the pixel
/// array in the input). When `headers_modified` is set, `file` and `info` are
/// re-encoded over the first 54 header bytes and the trailer is dropped, since
/// the rewritten `file_size` no longer counts it.
pub(crate) fn write_bitmap(
    header_region: &[u8],
    file: &FileHeader,
    info: &InfoHeader,
    pixels: &PixelBuffer,
    trailer: &[u8],
    headers_modified: bool,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    if info.width_px() != pixels.width() || info.height_px() != pixels.height() {
        return Err(BitmapError::geometry(pixels.width(), pixels.height()));
    }
    let offset = file.pixel_data_offset as usize;
    if offset < HEADER_SIZE {
        return Err(BitmapError::InvalidPixelOffset(file.pixel_data_offset));
    }
    let region = header_region
        .get(..offset)
        .ok_or(BitmapError::OutOfBounds {
            offset: 0,
            len: offset,
            available: header_region.len(),
        })?;

    let total = super::image_data_size(pixels.width(), pixels.height())?
        .checked_add(offset)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: pixels.width(),
            height: pixels.height(),
        })?;
    let mut out = Vec::with_capacity(total + trailer.len());
    out.extend_from_slice(region);
    if headers_modified {
        out[..HEADER_SIZE].copy_from_slice(&headers_to_bytes(file, info));
    }

    write_rows(&mut out, pixels, stop)?;
    if !headers_modified {
        out.extend_from_slice(trailer);
    } else if !trailer.is_empty() {
        log::warn!(
            "dropping {} bytes that followed the pixel array",
            trailer.len()
        );
    }
    log::trace!(
        "encoded {}x{} BMP, {} bytes (headers {})",
        pixels.width(),
        pixels.height(),
        out.len(),
        if headers_modified { "rewritten" } else { "verbatim" }
    );
    Ok(out)
}

/// Encode a buffer into a new file with freshly built headers.
///
/// The height is written positive, so the buffer's first row is stored first
/// and read back as the bottom row by viewers.
pub(crate) fn encode_bmp(pixels: &PixelBuffer, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (file, info) = fresh_headers(pixels.width(), pixels.height())?;
    write_bitmap(
        &headers_to_bytes(&file, &info),
        &file,
        &info,
        pixels,
        &[],
        false,
        stop,
    )
}

pub(crate) fn fresh_headers(width: u32, height: u32) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let info = InfoHeader::new_24bit(width, height)?;
    let file_size = (info.image_data_size as usize)
        .checked_add(HEADER_SIZE)
        .and_then(|s| u32::try_from(s).ok())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let file = FileHeader {
        signature: super::SIGNATURE,
        file_size,
        pixel_data_offset: HEADER_SIZE as u32,
    };
    Ok((file, info))
}

fn write_rows(out: &mut Vec<u8>, pixels: &PixelBuffer, stop: &dyn Stop) -> Result<(), BitmapError> {
    let stride = row_stride(pixels.width())?;
    let pad_bytes = row_padding(pixels.width())?;
    out.reserve(stride * pixels.height() as usize);

    for (y, row) in pixels.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&px.to_bgr());
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }
    Ok(())
}
