use alloc::format;

use crate::error::BitmapError;

/// Caps applied to a file's declared dimensions before any pixel memory is
/// allocated. `None` fields are unbounded.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded raster at 3 bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let exceeds = |what: &str, value: u64, max: Option<u64>| match max {
            Some(max) if value > max => Err(BitmapError::LimitExceeded(format!(
                "{what} {value} exceeds limit {max}"
            ))),
            _ => Ok(()),
        };
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), BitmapError> {
        match self.max_memory_bytes {
            Some(max) if bytes as u64 > max => Err(BitmapError::LimitExceeded(format!(
                "raster of {bytes} bytes exceeds memory limit {max}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Validate declared dimensions against optional limits.
pub(crate) fn check_limits(
    limits: Option<&Limits>,
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    let Some(limits) = limits else {
        return Ok(());
    };
    limits.check(width, height)?;
    let raster_bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    limits.check_memory(raster_bytes)
}
