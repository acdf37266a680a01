//! Pixel transforms over a [`PixelBuffer`], independent of any file I/O.
//!
//! These work on the buffer alone. To keep a file's headers in sync with a
//! geometry change, use [`crate::Bitmap::downscale_half`] instead of
//! [`downscale_half`].

use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Exchange red and blue in every pixel, in place. Green is untouched.
///
/// Applying it twice restores the original buffer.
pub fn swap_red_blue(buffer: &mut PixelBuffer) {
    for px in buffer.pixels_mut() {
        core::mem::swap(&mut px.red, &mut px.blue);
    }
}

/// Halve both dimensions by nearest-neighbour sampling.
///
/// Output pixel `(x, y)` is input pixel `(2x, 2y)`; an odd last row or column
/// is dropped. Fails with [`BitmapError::InvalidGeometry`] when either
/// dimension is below 2, since the result would be empty.
pub fn downscale_half(buffer: &PixelBuffer) -> Result<PixelBuffer, BitmapError> {
    let (width, height) = (buffer.width(), buffer.height());
    if width < 2 || height < 2 {
        return Err(BitmapError::geometry(width, height));
    }
    let new_width = width / 2;
    let new_height = height / 2;

    let mut pixels = Vec::with_capacity(new_width as usize * new_height as usize);
    for row in buffer.rows().step_by(2).take(new_height as usize) {
        pixels.extend(row.iter().step_by(2).take(new_width as usize).copied());
    }
    Ok(PixelBuffer::from_parts_unchecked(
        pixels, new_width, new_height,
    ))
}

/// Reverse the row order in place.
///
/// Decoding never flips; call this when top-down rows are needed from a
/// bottom-up file (or the reverse).
pub fn flip_rows(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let pixels = buffer.pixels_mut();
    for y in 0..height / 2 {
        let (top, bottom) = pixels.split_at_mut((height - 1 - y) * width);
        top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use alloc::vec;

    fn numbered(w: u32, h: u32) -> PixelBuffer {
        let pixels = (0..w * h)
            .map(|i| Pixel::new(i as u8, (i * 3) as u8, 255 - i as u8))
            .collect();
        PixelBuffer::new(pixels, w, h).unwrap()
    }

    #[test]
    fn swap_touches_every_column() {
        let mut buf = numbered(5, 3);
        let orig = buf.clone();
        swap_red_blue(&mut buf);
        for (a, b) in orig.pixels().iter().zip(buf.pixels()) {
            assert_eq!(a.red, b.blue);
            assert_eq!(a.blue, b.red);
            assert_eq!(a.green, b.green);
        }
    }

    #[test]
    fn downscale_samples_even_coordinates() {
        let buf = numbered(5, 5);
        let small = downscale_half(&buf).unwrap();
        assert_eq!((small.width(), small.height()), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(small.get(x, y), buf.get(2 * x, 2 * y));
            }
        }
    }

    #[test]
    fn downscale_rejects_single_row_or_column() {
        let row = numbered(6, 1);
        assert!(matches!(
            downscale_half(&row),
            Err(BitmapError::InvalidGeometry { width: 6, height: 1 })
        ));
        let col = numbered(1, 6);
        assert!(downscale_half(&col).is_err());
    }

    #[test]
    fn flip_reverses_rows() {
        let mut buf = numbered(3, 3);
        let orig = buf.clone();
        flip_rows(&mut buf);
        assert_eq!(buf.row(0), orig.row(2));
        assert_eq!(buf.row(1), orig.row(1));
        assert_eq!(buf.row(2), orig.row(0));
        flip_rows(&mut buf);
        assert_eq!(buf, orig);
    }

    #[test]
    fn flip_even_height() {
        let a = Pixel::new(1, 1, 1);
        let b = Pixel::new(2, 2, 2);
        let mut buf = PixelBuffer::new(vec![a, a, b, b], 2, 2).unwrap();
        flip_rows(&mut buf);
        assert_eq!(buf.pixels(), &[b, b, a, a]);
    }
}
