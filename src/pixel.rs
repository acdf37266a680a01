use alloc::vec;
use alloc::vec::Vec;

use crate::error::BitmapError;

/// One 24-bit pixel. Stored on disk as blue, green, red.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build a pixel from its on-disk byte order.
    #[inline]
    pub(crate) fn from_bgr(bgr: &[u8]) -> Self {
        Self {
            red: bgr[2],
            green: bgr[1],
            blue: bgr[0],
        }
    }

    /// On-disk byte order.
    #[inline]
    pub(crate) fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.red, p.green, p.blue)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Pixel::new(p.r, p.g, p.b)
    }
}

/// Same channel order as the file.
#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::alt::BGR8 {
    fn from(p: Pixel) -> Self {
        rgb::alt::BGR8 {
            b: p.blue,
            g: p.green,
            r: p.red,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::alt::BGR8> for Pixel {
    fn from(p: rgb::alt::BGR8) -> Self {
        Pixel::new(p.r, p.g, p.b)
    }
}

/// Owned, row-major, padding-free pixel grid.
///
/// Rows appear in the same order they had on disk: no vertical flip is
/// applied when decoding, whatever the sign of the header height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap `pixels` as a `width` x `height` grid.
    ///
    /// Fails with [`BitmapError::InvalidGeometry`] if either dimension is zero
    /// or the pixel count does not match.
    pub fn new(pixels: Vec<Pixel>, width: u32, height: u32) -> Result<Self, BitmapError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(BitmapError::geometry(width, height));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// A `width` x `height` grid of `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, BitmapError> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        Self::new(vec![pixel; count], width, height)
    }

    pub(crate) fn from_parts_unchecked(pixels: Vec<Pixel>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Linear index of pixel `(x, y)`: `y * width + x`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Mutable pixel at `(x, y)`, or `None` outside the grid.
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        Some(&mut self.pixels[idx])
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.pixels[start..start + self.width as usize])
    }

    /// Iterate rows in buffer order.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width as usize)
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Copy out as typed RGB pixels.
    #[cfg(feature = "rgb")]
    pub fn to_rgb8(&self) -> Vec<rgb::RGB8> {
        self.pixels.iter().map(|&p| p.into()).collect()
    }

    /// Zero-copy 2D view of the buffer.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels[..], self.width as usize, self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| Pixel::new(i as u8, (i * 2) as u8, (i * 3) as u8))
            .collect();
        PixelBuffer::new(pixels, width, height).unwrap()
    }

    #[test]
    fn rows_and_get_agree() {
        let buf = ramp(3, 2);
        assert_eq!(buf.rows().count(), 2);
        assert_eq!(buf.row(1).unwrap()[2], buf.get(2, 1).unwrap());
        assert!(buf.get(3, 0).is_none());
        assert!(buf.row(2).is_none());
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb8_copy_keeps_channels() {
        let buf = ramp(2, 2);
        let rgb = buf.to_rgb8();
        assert_eq!(rgb.len(), 4);
        assert_eq!(rgb[3], rgb::RGB8::new(3, 6, 9));
        assert_eq!(Pixel::from(rgb[3]), buf.pixels()[3]);
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn bgr8_matches_disk_order() {
        let px = Pixel::new(10, 20, 30);
        let bgr: rgb::alt::BGR8 = px.into();
        assert_eq!((bgr.b, bgr.g, bgr.r), (30, 20, 10));
        assert_eq!([bgr.b, bgr.g, bgr.r], px.to_bgr());
        assert_eq!(Pixel::from(bgr), px);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_view_shares_the_buffer() {
        let buf = ramp(3, 2);
        let img = buf.as_imgref();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.stride(), 3);
        assert_eq!(img.buf().as_ptr(), buf.pixels().as_ptr());
        assert_eq!(img.rows().nth(1).unwrap(), buf.row(1).unwrap());
    }
}
