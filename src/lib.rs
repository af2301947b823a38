//! # rasterbits
//!
//! BMP and PCX decoders and encoders over a plain 24-bit RGB [`Raster`].
//!
//! Every decode path normalizes to 8-bit-per-channel RGB, whatever the
//! source bit depth: palettes are resolved while decoding and then dropped.
//! Encoders always write true color, so a paletted file re-encodes as
//! 24-bit.
//!
//! ## Supported Formats
//!
//! ### BMP (`bmp` feature)
//! - Decode: BITMAPCOREHEADER (12), OS/2 2.x (64), BITMAPINFOHEADER (40) and
//!   V4/V5 (≥108) headers; uncompressed 1, 4, 8 (paletted) and 24 bpp;
//!   bottom-up and top-down row order
//! - Encode: uncompressed 24 bpp, BITMAPINFOHEADER, no palette
//!
//! ### PCX (`pcx` feature)
//! - Decode: RLE, 1/4/8 bpp single plane with EGA header palette or VGA
//!   trailer palette; 8 bpp × 3 planes true color
//! - Encode: version 5, RLE, 8 bpp × 3 planes
//!
//! ## Non-Goals
//!
//! - Color reduction when saving (output is always true color)
//! - BMP RLE4/RLE8/bitfield compression, 16/32 bpp
//! - Rendering, resampling, or other image processing
//!
//! ## Usage
//!
//! ```no_run
//! use rasterbits::{DecodeRequest, EncodeRequest, ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP/PCX bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! let raster = DecodeRequest::new(data).decode(Unstoppable)?;
//! for (key, value) in raster.headers().iter() {
//!     println!("{key}: {value}");
//! }
//!
//! let pcx = EncodeRequest::pcx().encode(&raster, Unstoppable)?;
//! # let _ = pcx;
//! # Ok::<(), rasterbits::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod raster;
mod reader;
mod unpack;
mod writer;

#[cfg(feature = "bmp")]
mod bmp;

#[cfg(feature = "pcx")]
mod pcx;

mod decode;
mod encode;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use info::{ImageFormat, ImageInfo};
pub use limits::Limits;
pub use raster::{BACKGROUND, Headers, Raster};
pub use reader::ByteReader;
pub use rgb::RGB8;
pub use writer::{ByteWriter, Sink};

#[cfg(feature = "std")]
pub use writer::IoSink;

use alloc::vec::Vec;

/// Decode BMP or PCX, detected from the leading magic bytes.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Raster, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Read a whole stream into memory and decode it.
#[cfg(feature = "std")]
pub fn decode_from_reader<R: std::io::Read>(
    mut reader: R,
    stop: impl Stop,
) -> Result<Raster, BitmapError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode(&data, stop)
}

#[cfg(feature = "bmp")]
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Raster, BitmapError> {
    DecodeRequest::new(data)
        .with_format(ImageFormat::Bmp)
        .decode(stop)
}

#[cfg(feature = "bmp")]
pub fn encode_bmp(raster: &Raster, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::bmp().encode(raster, stop)
}

#[cfg(feature = "pcx")]
pub fn decode_pcx(data: &[u8], stop: impl Stop) -> Result<Raster, BitmapError> {
    DecodeRequest::new(data)
        .with_format(ImageFormat::Pcx)
        .decode(stop)
}

#[cfg(feature = "pcx")]
pub fn encode_pcx(raster: &Raster, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::pcx().encode(raster, stop)
}
