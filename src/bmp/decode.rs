//! BMP decoder: core (OS/2) and info-family (Windows 3.x, V4, V5) headers,
//! uncompressed 1/4/8/24 bpp.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGB8;

use crate::error::BitmapError;
use crate::raster::Raster;
use crate::reader::ByteReader;
use crate::unpack::{apply_palette, expand_indices};

pub(crate) const FILE_HEADER_LEN: u32 = 14;

// ── DIB header variants ─────────────────────────────────────────────

/// Structural family selected by the DIB header length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DibVariant {
    /// 12 (BITMAPCOREHEADER) or 64 (OS/2 2.x): 16-bit dimensions, 3-byte palette entries.
    Core,
    /// 40 (BITMAPINFOHEADER) or ≥108 (V4/V5): 32-bit dimensions, 4-byte palette entries.
    Info,
}

impl DibVariant {
    fn from_len(len: u32) -> Result<Self, BitmapError> {
        match len {
            12 | 64 => Ok(Self::Core),
            40 => Ok(Self::Info),
            n if n >= 108 => Ok(Self::Info),
            n => Err(BitmapError::MalformedHeader(format!(
                "unknown BMP DIB header length: {n}"
            ))),
        }
    }

    fn palette_entry_len(self) -> usize {
        match self {
            Self::Core => 3,
            Self::Info => 4,
        }
    }
}

fn header_type_name(dib_len: u32) -> &'static str {
    match dib_len {
        12 => "BITMAPCOREHEADER",
        64 => "OS22XBITMAPHEADER",
        40 => "BITMAPINFOHEADER",
        108 => "BITMAPV4HEADER",
        124 => "BITMAPV5HEADER",
        _ => "BITMAPINFOHEADER (extended)",
    }
}

// ── Parsed header ───────────────────────────────────────────────────

pub(crate) struct BmpHeader {
    pub file_length: u32,
    pub data_offset: u32,
    pub dib_len: u32,
    pub variant: DibVariant,
    pub width: u32,
    pub height: u32,
    /// Negative stored height: rows are stored top row first.
    pub top_down: bool,
    pub bpp: u16,
    pub raw_size: u32,
    /// Declared palette entries; 0 means `2^bpp`.
    pub palette_len: u32,
}

impl BmpHeader {
    /// Only uncompressed 1, 4, 8 and 24 bpp are decodable.
    pub fn check_bpp(&self) -> Result<(), BitmapError> {
        match self.bpp {
            1 | 4 | 8 | 24 => Ok(()),
            other => Err(BitmapError::UnsupportedBpp(other)),
        }
    }

    /// Padded length of one stored row: `ceil(bpp * width / 32) * 4`.
    pub fn row_bytes(&self) -> Result<usize, BitmapError> {
        (self.width as usize)
            .checked_mul(usize::from(self.bpp))
            .map(|bits| bits.div_ceil(32) * 4)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// Parse the 14-byte file header and the DIB header, leaving `r` at the end
/// of the declared DIB header. Bit depth is not validated here: compression
/// and palette presence are reported first.
pub(crate) fn parse_header(r: &mut ByteReader<'_>) -> Result<BmpHeader, BitmapError> {
    if r.read_array::<2>()? != *b"BM" {
        return Err(BitmapError::InvalidSignature);
    }
    let file_length = r.read_u32()?;
    r.skip(4)?; // reserved
    let data_offset = r.read_u32()?;

    let dib_len = r.read_u32()?;
    let variant = DibVariant::from_len(dib_len)?;
    let mut consumed: u32 = 4;

    let (width, height) = match variant {
        DibVariant::Core => {
            consumed += 4;
            (i32::from(r.read_i16()?), i32::from(r.read_i16()?))
        }
        DibVariant::Info => {
            consumed += 8;
            (r.read_i32()?, r.read_i32()?)
        }
    };
    if width < 0 {
        return Err(BitmapError::MalformedHeader(format!(
            "BMP width is negative ({width})"
        )));
    }

    let planes = r.read_u16()?;
    let bpp = r.read_u16()?;
    consumed += 4;
    if planes != 1 {
        return Err(BitmapError::UnsupportedPlanes { planes, bpp });
    }
    let mut header = BmpHeader {
        file_length,
        data_offset,
        dib_len,
        variant,
        width: width as u32,
        height: height.unsigned_abs(),
        top_down: height < 0,
        bpp,
        raw_size: 0,
        palette_len: 0,
    };

    if variant == DibVariant::Info {
        let compression = r.read_u32()?;
        if compression != 0 {
            return Err(BitmapError::UnsupportedCompression(compression));
        }
        header.raw_size = r.read_u32()?;
        if header.raw_size == 0 {
            // Field is allowed to be 0 for BI_RGB; report the real padded size.
            header.raw_size = header
                .row_bytes()?
                .checked_mul(header.height as usize)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(u32::MAX);
        }
        r.skip(8)?; // resolution
        header.palette_len = r.read_u32()?;
        r.skip(4)?; // important colors
        consumed += 24;
    }

    // V4/V5 masks, color space and ICC fields are not interpreted.
    r.skip((dib_len - consumed) as usize)?;

    log::debug!(
        "BMP {}x{} bpp={} dib={} ({}) offset={} top_down={}",
        header.width,
        header.height,
        header.bpp,
        dib_len,
        header_type_name(dib_len),
        data_offset,
        header.top_down
    );

    Ok(header)
}

/// Read the palette and pixel rows that follow the header into a new raster.
pub(crate) fn decode_body(
    r: &mut ByteReader<'_>,
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<Raster, BitmapError> {
    let gap = i64::from(header.data_offset) - i64::from(FILE_HEADER_LEN) - i64::from(header.dib_len);
    if gap < 0 {
        return Err(BitmapError::MalformedHeader(format!(
            "BMP pixel data offset {} points inside the header",
            header.data_offset
        )));
    }
    let gap = gap as usize;

    let palette = if header.bpp <= 8 {
        if gap == 0 {
            return Err(BitmapError::MissingPalette);
        }
        let palette = read_palette(r, header)?;
        let palette_bytes = palette.len() * header.variant.palette_entry_len();
        if gap > palette_bytes {
            r.skip(gap - palette_bytes)?;
        } else if gap < palette_bytes {
            log::warn!(
                "BMP palette ({palette_bytes} bytes) runs past the pixel data offset ({gap} bytes available)"
            );
        }
        palette
    } else {
        r.skip(gap)?;
        Vec::new()
    };
    header.check_bpp()?;

    let row_bytes = header.row_bytes()?;
    let w = header.width as usize;
    let h = header.height as usize;
    let needed = row_bytes
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    if needed > r.remaining() {
        return Err(BitmapError::UnexpectedEof);
    }

    stop.check()?;
    let mut raster = Raster::new(header.width, header.height);
    let mut indices = vec![0u8; if header.bpp <= 8 { w } else { 0 }];

    // Zero-width rows hold no bytes and no pixels.
    let stored_rows = if row_bytes == 0 { 0 } else { h };
    for stored in 0..stored_rows {
        if stored % 16 == 0 {
            stop.check()?;
        }
        let y = if header.top_down { stored } else { h - 1 - stored };
        // Whole padded row: pixel bytes plus alignment padding.
        let src = r.read_bytes(row_bytes)?;
        let dst = &mut raster.pixels_mut()[y * w..(y + 1) * w];
        match header.bpp {
            24 => {
                for (px, bgr) in dst.iter_mut().zip(src.chunks_exact(3)) {
                    *px = RGB8::new(bgr[2], bgr[1], bgr[0]);
                }
            }
            1 | 4 | 8 => {
                expand_indices(header.bpp, src, &mut indices);
                apply_palette(&palette, &indices, dst)?;
            }
            other => return Err(BitmapError::UnsupportedBpp(other)),
        }
    }

    let headers = raster.headers_mut();
    headers.insert("Signature", "BM");
    headers.insert("File length", format!("{}", header.file_length));
    headers.insert("Header length", format!("{}", header.dib_len));
    headers.insert("Header type", header_type_name(header.dib_len));
    headers.insert("Size", format!("{}px * {}px", header.width, header.height));
    headers.insert("Bpp", format!("{}", header.bpp));
    if header.variant == DibVariant::Info {
        headers.insert("Raw size", format!("{}", header.raw_size));
    }
    headers.insert(
        "Palette",
        if palette.is_empty() {
            alloc::string::String::from("none")
        } else {
            format!("{} colors", palette.len())
        },
    );
    headers.insert(
        "Row order",
        if header.top_down { "top-down" } else { "bottom-up" },
    );

    Ok(raster)
}

/// Palette entries are stored B,G,R (core) or B,G,R,reserved (info).
fn read_palette(r: &mut ByteReader<'_>, header: &BmpHeader) -> Result<Vec<RGB8>, BitmapError> {
    let count = if header.palette_len == 0 {
        1usize << header.bpp
    } else {
        header.palette_len as usize
    };
    let entry_len = header.variant.palette_entry_len();
    if count
        .checked_mul(entry_len)
        .is_none_or(|bytes| bytes > r.remaining())
    {
        return Err(BitmapError::UnexpectedEof);
    }
    log::trace!("BMP palette: {count} entries of {entry_len} bytes");

    let mut palette = Vec::with_capacity(count);
    for _ in 0..count {
        let entry = r.read_bytes(entry_len)?;
        palette.push(RGB8::new(entry[2], entry[1], entry[0]));
    }
    Ok(palette)
}
