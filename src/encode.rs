use alloc::vec::Vec;

use enough::Stop;

use crate::error::BitmapError;
use crate::info::ImageFormat;
use crate::raster::Raster;
use crate::writer::{ByteWriter, Sink};

/// Builder for a single encode. Output is always 24-bit true color.
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    format: ImageFormat,
}

impl EncodeRequest {
    /// Uncompressed 24-bit BMP with a BITMAPINFOHEADER.
    #[cfg(feature = "bmp")]
    pub fn bmp() -> Self {
        Self {
            format: ImageFormat::Bmp,
        }
    }

    /// Version 5 PCX, RLE, 8 bits × 3 planes.
    #[cfg(feature = "pcx")]
    pub fn pcx() -> Self {
        Self {
            format: ImageFormat::Pcx,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Encode into a new buffer.
    pub fn encode(&self, raster: &Raster, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        let mut out = ByteWriter::new(Vec::new());
        self.encode_into(raster, &mut out, &stop)?;
        out.finish()
    }

    /// Encode into any [`std::io::Write`]. Output is buffered and flushed before returning.
    #[cfg(feature = "std")]
    pub fn encode_to<W: std::io::Write>(
        &self,
        raster: &Raster,
        writer: W,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        let mut out = ByteWriter::new(crate::writer::IoSink(std::io::BufWriter::new(writer)));
        self.encode_into(raster, &mut out, &stop)?;
        out.finish()?;
        Ok(())
    }

    fn encode_into<S: Sink>(
        &self,
        raster: &Raster,
        out: &mut ByteWriter<S>,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        match self.format {
            #[cfg(feature = "bmp")]
            ImageFormat::Bmp => crate::bmp::encode(raster, out, stop),
            #[cfg(feature = "pcx")]
            ImageFormat::Pcx => crate::pcx::encode(raster, out, stop),
            #[allow(unreachable_patterns)]
            _ => Err(BitmapError::UnrecognizedFormat),
        }
    }
}
