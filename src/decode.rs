use alloc::string::String;

use enough::Stop;

use crate::error::BitmapError;
use crate::info::ImageFormat;
use crate::limits::Limits;
use crate::raster::Raster;

/// Builder for a single decode.
///
/// ```no_run
/// use rasterbits::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // BMP or PCX bytes
/// let limits = Limits { max_pixels: Some(4096 * 4096), ..Default::default() };
/// let raster = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_name("photo.pcx")
///     .decode(Unstoppable)?;
/// println!("{}x{}", raster.width(), raster.height());
/// # Ok::<(), rasterbits::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    format: Option<ImageFormat>,
    name: Option<String>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            format: None,
            name: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Skip magic-byte detection and decode as `format`.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Display label for the resulting raster (usually the file name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Raster, BitmapError> {
        let format = match self.format {
            Some(f) => f,
            None => ImageFormat::detect(self.data).ok_or(BitmapError::UnrecognizedFormat)?,
        };
        let mut raster = match format {
            #[cfg(feature = "bmp")]
            ImageFormat::Bmp => crate::bmp::decode(self.data, self.limits, &stop)?,
            #[cfg(feature = "pcx")]
            ImageFormat::Pcx => crate::pcx::decode(self.data, self.limits, &stop)?,
            #[allow(unreachable_patterns)]
            _ => return Err(BitmapError::UnrecognizedFormat),
        };
        if let Some(name) = self.name {
            raster.set_name(name);
        }
        Ok(raster)
    }
}
