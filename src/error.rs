use alloc::string::String;
use enough::StopReason;

/// Errors from BMP/PCX decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid file signature")]
    InvalidSignature,

    #[error("unsupported compression type {0}")]
    UnsupportedCompression(u32),

    #[error("unsupported encoding {0} (only RLE is supported)")]
    UnsupportedEncoding(u8),

    #[error("unsupported bit depth: {0} bpp")]
    UnsupportedBpp(u16),

    #[error("unsupported plane configuration: {planes} planes at {bpp} bpp")]
    UnsupportedPlanes { planes: u16, bpp: u16 },

    #[error("paletted image has no palette")]
    MissingPalette,

    #[error("invalid color encoding: {bpp} bpp with {planes} planes")]
    InvalidColorEncoding { bpp: u16, planes: u16 },

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
