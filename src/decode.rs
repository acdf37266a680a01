use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::header::{FileHeader, InfoHeader};
use crate::bmp::{self, RowOrder};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{Pixel, PixelBuffer};
use crate::transform;

/// Builder for decoding a BMP from memory.
///
/// ```
/// use zenbmp::{DecodeRequest, Limits, Unstoppable};
///
/// # fn run(data: &[u8]) -> Result<(), zenbmp::BitmapError> {
/// let limits = Limits { max_pixels: Some(16_000_000), ..Default::default() };
/// let bitmap = DecodeRequest::new(data).with_limits(&limits).decode(Unstoppable)?;
/// println!("{}x{}", bitmap.width(), bitmap.height());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse the headers, check limits, and extract the pixel buffer.
    ///
    /// Nothing is returned on failure: a truncated or unsupported file never
    /// yields a partial buffer.
    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BitmapError> {
        let (file, info) = bmp::decode::parse_headers(self.data)?;
        if let Some(limits) = self.limits {
            limits.check(info.width_px(), info.height_px())?;
        }
        stop.check()?;

        let pixels = bmp::decode::extract(self.data, &file, &info, &stop)?;
        let header_region = self
            .data
            .get(..file.pixel_data_offset as usize)
            .ok_or(BitmapError::UnexpectedEof)?
            .to_vec();
        let trailer = bmp::decode::trailer(self.data, &file, &info).to_vec();
        if !trailer.is_empty() {
            log::debug!("{} bytes follow the pixel array", trailer.len());
        }

        Ok(Bitmap {
            file_header: file,
            info_header: info,
            header_region,
            pixels,
            trailer,
            headers_modified: false,
        })
    }
}

/// A decoded 24-bit bitmap: parsed headers, the raw header bytes they came
/// from, and the padding-free pixels.
///
/// Encoding an unmodified `Bitmap` reproduces the input file byte for byte,
/// including any bytes that followed the pixel array. Geometry-changing
/// operations rewrite the header fields they affect and drop those trailing
/// bytes; everything else in the header region is kept verbatim.
#[derive(Clone, Debug)]
pub struct Bitmap {
    file_header: FileHeader,
    info_header: InfoHeader,
    header_region: Vec<u8>,
    pixels: PixelBuffer,
    trailer: Vec<u8>,
    headers_modified: bool,
}

impl Bitmap {
    /// Wrap a buffer in freshly built 24-bit headers.
    pub fn from_pixels(pixels: PixelBuffer) -> Result<Self, BitmapError> {
        let (file, info) = bmp::encode::fresh_headers(pixels.width(), pixels.height())?;
        Ok(Self {
            header_region: bmp::header::headers_to_bytes(&file, &info).to_vec(),
            file_header: file,
            info_header: info,
            pixels,
            trailer: Vec::new(),
            headers_modified: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Number of rows, regardless of row order.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn row_order(&self) -> RowOrder {
        self.info_header.row_order()
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Everything before the first pixel row, as read from the input.
    pub fn header_region(&self) -> &[u8] {
        &self.header_region
    }

    /// Bytes that followed the last pixel row in the input. Written back
    /// unless the headers are rewritten.
    pub fn trailer(&self) -> &[u8] {
        &self.trailer
    }

    /// Whether the header fields will be re-encoded on write.
    pub fn headers_modified(&self) -> bool {
        self.headers_modified
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Mutable pixel access. The dimensions cannot change through this.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.pixels.pixels_mut()
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    /// Swap red and blue in every pixel. Headers are unaffected.
    pub fn swap_red_blue(&mut self) {
        transform::swap_red_blue(&mut self.pixels);
    }

    /// Halve the image by nearest-neighbour sampling and update width,
    /// height (keeping its sign), image data size and file size to match.
    pub fn downscale_half(&mut self) -> Result<(), BitmapError> {
        let pixels = transform::downscale_half(&self.pixels)?;
        let (width, height) = (pixels.width(), pixels.height());

        let image_data_size = u32::try_from(bmp::image_data_size(width, height)?)
            .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
        let file_size = self
            .file_header
            .pixel_data_offset
            .checked_add(image_data_size)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let signed_height = i32::try_from(height)
            .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;

        self.info_header.width = i32::try_from(width)
            .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
        self.info_header.height = match self.row_order() {
            RowOrder::BottomUp => signed_height,
            RowOrder::TopDown => -signed_height,
        };
        self.info_header.image_data_size = image_data_size;
        self.file_header.file_size = file_size;
        self.pixels = pixels;
        self.headers_modified = true;

        log::debug!(
            "downscaled to {}x{}, image data size {}",
            width,
            height,
            image_data_size
        );
        Ok(())
    }

    /// Assemble the complete output file in memory.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        bmp::encode::write_bitmap(
            &self.header_region,
            &self.file_header,
            &self.info_header,
            &self.pixels,
            &self.trailer,
            self.headers_modified,
            &stop,
        )
    }

    /// Encode, then hand the finished bytes to `sink` in one write.
    ///
    /// Encoding errors surface before anything reaches the sink.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut sink: W, stop: impl Stop) -> Result<(), BitmapError> {
        let bytes = self.encode(stop)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }
}
