use crate::bmp::BYTES_PER_PIXEL;
use crate::error::BitmapError;

/// Resource limits applied while decoding.
///
/// All fields default to `None` (no limit). Limits are checked after the
/// headers are parsed and before the pixel buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded pixel buffer, at 3 bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a `width` x `height` bitmap that exceeds any configured limit.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        let measured = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            (
                "pixel buffer bytes",
                pixels.saturating_mul(BYTES_PER_PIXEL as u64),
                self.max_memory_bytes,
            ),
        ];
        for (what, value, limit) in measured {
            if let Some(max) = limit.filter(|&max| value > max) {
                log::debug!("{what} {value} over limit {max}");
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "{what} {value} exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_limits_accepts_anything() {
        assert!(Limits::default().check(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn limits_are_inclusive() {
        let limits = Limits {
            max_width: Some(10),
            max_height: Some(5),
            max_pixels: Some(50),
            max_memory_bytes: Some(150),
        };
        assert!(limits.check(10, 5).is_ok());
        assert!(limits.check(11, 1).is_err());
        assert!(limits.check(1, 6).is_err());
    }

    #[test]
    fn first_exceeded_limit_is_reported() {
        let limits = Limits {
            max_pixels: Some(100),
            max_memory_bytes: Some(30),
            ..Limits::default()
        };
        let Err(BitmapError::LimitExceeded(msg)) = limits.check(20, 20) else {
            panic!("expected LimitExceeded");
        };
        assert!(msg.starts_with("pixel count 400"), "{msg}");

        let Err(BitmapError::LimitExceeded(msg)) = limits.check(4, 4) else {
            panic!("expected LimitExceeded");
        };
        assert!(msg.starts_with("pixel buffer bytes 48"), "{msg}");
    }
}
