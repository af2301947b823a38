//! PCX decoder and 24-bit RLE encoder (internal).
//!
//! Use top-level [`crate::decode_pcx`], [`crate::encode_pcx`], etc.

mod decode;
mod encode;
mod rle;

use enough::Stop;

use crate::error::BitmapError;
use crate::info::{ImageFormat, ImageInfo};
use crate::limits::{Limits, check_limits};
use crate::raster::Raster;
use crate::reader::ByteReader;
use crate::writer::{ByteWriter, Sink};

/// Decode PCX data into an RGB raster.
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

/// Parse the 128-byte header only.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BitmapError> {
    let header = decode::parse_header(&mut ByteReader::new(data))?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        format: ImageFormat::Pcx,
        bits_per_pixel: u16::from(header.bpp) * u16::from(header.planes),
        planes: u16::from(header.planes),
    })
}

/// Encode to 8 bpp × 3 planes RLE PCX.
pub(crate) fn encode<S: Sink>(
    raster: &Raster,
    out: &mut ByteWriter<S>,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    encode::encode_pcx(raster, out, stop)
}
