//! BMP decoder and 24-bit encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.

mod decode;
mod encode;

use enough::Stop;

use crate::error::BitmapError;
use crate::info::{ImageFormat, ImageInfo};
use crate::limits::{Limits, check_limits};
use crate::raster::Raster;
use crate::reader::ByteReader;
use crate::writer::{ByteWriter, Sink};

/// Decode BMP data into an RGB raster.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Raster, BitmapError> {
    let mut reader = ByteReader::new(data);
    let header = decode::parse_header(&mut reader)?;
    check_limits(limits, header.width, header.height)?;
    stop.check()?;
    decode::decode_body(&mut reader, &header, stop)
}

/// Parse headers only.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BitmapError> {
    let header = decode::parse_header(&mut ByteReader::new(data))?;
    header.check_bpp()?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        format: ImageFormat::Bmp,
        bits_per_pixel: header.bpp,
        planes: 1,
    })
}

/// Encode to 24-bit BMP.
pub(crate) fn encode<S: Sink>(
    raster: &Raster,
    out: &mut ByteWriter<S>,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    encode::encode_bmp(raster, out, stop)
}
