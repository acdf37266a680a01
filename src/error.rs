use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, transforming, and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("not a BMP file (missing \"BM\" signature)")]
    NotBmp,

    #[error("unsupported info header size {0} (only the 40-byte Windows header is supported)")]
    UnsupportedHeader(u32),

    #[error("unsupported bit depth {0} (only 24 bits per pixel is supported)")]
    UnsupportedBitDepth(u16),

    #[error("unsupported compression method {0} (only uncompressed is supported)")]
    UnsupportedCompression(u32),

    #[error("pixel data out of bounds: {len} bytes at offset {offset}, input has {available}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("invalid geometry: {width}x{height}")]
    InvalidGeometry { width: i64, height: i64 },

    #[error("pixel data offset {0} overlaps the 54-byte header")]
    InvalidPixelOffset(u32),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

impl BitmapError {
    pub(crate) fn geometry(width: impl Into<i64>, height: impl Into<i64>) -> Self {
        BitmapError::InvalidGeometry {
            width: width.into(),
            height: height.into(),
        }
    }
}
