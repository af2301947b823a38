use crate::error::BitmapError;

/// Image format detected from magic bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Windows/OS2 bitmap (`"BM"`).
    Bmp,
    /// ZSoft Paintbrush (`0x0A` manufacturer byte).
    Pcx,
}

impl ImageFormat {
    /// Guess the format from the first bytes of a file.
    ///
    /// PCX has only a one-byte signature, so this is a hint, not a guarantee.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match data {
            [b'B', b'M', ..] => Some(Self::Bmp),
            [0x0A, _, ..] => Some(Self::Pcx),
            _ => None,
        }
    }
}

/// Header summary obtained without decoding pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Bits per pixel across all planes (24 for 3-plane PCX).
    pub bits_per_pixel: u16,
    pub planes: u16,
}

impl ImageInfo {
    /// Detect the format and parse its header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        match ImageFormat::detect(data) {
            #[cfg(feature = "bmp")]
            Some(ImageFormat::Bmp) => crate::bmp::probe(data),
            #[cfg(feature = "pcx")]
            Some(ImageFormat::Pcx) => crate::pcx::probe(data),
            _ => Err(BitmapError::UnrecognizedFormat),
        }
    }
}
