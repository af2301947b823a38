//! PCX decoder: RLE body, 1/4/8 bpp paletted (EGA or VGA palette) and
//! 8 bpp × 3 planes true color.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGB8;

use super::rle;
use crate::error::BitmapError;
use crate::raster::Raster;
use crate::reader::ByteReader;
use crate::unpack::{apply_palette, expand_indices, packed_len};

pub(crate) const MANUFACTURER: u8 = 0x0A;
pub(crate) const ENCODING_RLE: u8 = 1;
/// Marker byte in front of the trailing 256-color palette.
const VGA_PALETTE_MARKER: u8 = 0x0C;
/// Marker plus 256 R,G,B triples.
const VGA_BLOCK_LEN: usize = 1 + 768;

pub(crate) struct PcxHeader {
    pub version: u8,
    pub bpp: u8,
    pub width: u32,
    pub height: u32,
    /// 16 R,G,B triples, each component stored shifted into the top 2 bits.
    pub ega_palette: [u8; 48],
    pub planes: u8,
    pub bytes_per_line: u16,
}

impl PcxHeader {
    fn is_true_color(&self) -> bool {
        self.planes == 3 && self.bpp == 8
    }

    fn scanline_len(&self) -> usize {
        usize::from(self.planes) * usize::from(self.bytes_per_line)
    }
}

/// Parse the fixed 128-byte header.
pub(crate) fn parse_header(r: &mut ByteReader<'_>) -> Result<PcxHeader, BitmapError> {
    if r.read_u8()? != MANUFACTURER {
        return Err(BitmapError::InvalidSignature);
    }
    let version = r.read_u8()?;
    let encoding = r.read_u8()?;
    if encoding != ENCODING_RLE {
        return Err(BitmapError::UnsupportedEncoding(encoding));
    }
    let bpp = r.read_u8()?;

    let x_start = i32::from(r.read_i16()?);
    let y_start = i32::from(r.read_i16()?);
    let x_end = i32::from(r.read_i16()?);
    let y_end = i32::from(r.read_i16()?);
    let width = x_end - x_start + 1;
    let height = y_end - y_start + 1;
    if width < 0 || height < 0 {
        return Err(BitmapError::MalformedHeader(format!(
            "PCX bounding box ({x_start},{y_start})-({x_end},{y_end}) is inverted"
        )));
    }

    r.skip(4)?; // resolution
    let ega_palette = r.read_array::<48>()?;
    r.skip(1)?; // reserved
    let planes = r.read_u8()?;
    if !((planes == 1 && bpp <= 8) || (planes == 3 && bpp == 8)) {
        return Err(BitmapError::UnsupportedPlanes {
            planes: u16::from(planes),
            bpp: u16::from(bpp),
        });
    }
    let bytes_per_line = r.read_u16()?;
    r.skip(60)?; // palette info, screen size, filler

    let header = PcxHeader {
        version,
        bpp,
        width: width as u32,
        height: height as u32,
        ega_palette,
        planes,
        bytes_per_line,
    };

    if planes == 1 && !matches!(bpp, 1 | 4 | 8) {
        return Err(BitmapError::InvalidColorEncoding {
            bpp: u16::from(bpp),
            planes: u16::from(planes),
        });
    }
    let plane_bytes = packed_len(u16::from(bpp), header.width as usize);
    if plane_bytes > usize::from(bytes_per_line) {
        return Err(BitmapError::MalformedHeader(format!(
            "PCX bytes per line ({bytes_per_line}) too small for {} pixels at {bpp} bpp",
            header.width
        )));
    }

    log::debug!(
        "PCX v{} {}x{} bpp={} planes={} bytes_per_line={}",
        version,
        header.width,
        header.height,
        bpp,
        planes,
        bytes_per_line
    );

    Ok(header)
}

/// Decompress the body, resolve the palette and expand into a new raster.
pub(crate) fn decode_body(
    r: &mut ByteReader<'_>,
    header: &PcxHeader,
    stop: &dyn Stop,
) -> Result<Raster, BitmapError> {
    let scan_len = header.scanline_len();
    let h = header.height as usize;

    // Grows with the data actually decoded rather than trusting the header.
    let mut scanlines: Vec<u8> = Vec::new();
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let start = scanlines.len();
        scanlines.resize(start + scan_len, 0);
        rle::decode_scanline(r, &mut scanlines[start..])?;
    }

    let vga_palette = if header.is_true_color() {
        None
    } else {
        read_vga_palette(r)?
    };
    let has_vga = vga_palette.is_some();
    let (palette, palette_name) = match vga_palette {
        Some(vga) => (vga, "VGA"),
        None if header.is_true_color() => (Vec::new(), "none"),
        None => (ega_palette(&header.ega_palette), "EGA"),
    };
    log::trace!("PCX palette: {palette_name} ({} entries)", palette.len());

    stop.check()?;
    let mut raster = Raster::new(header.width, header.height);
    let w = header.width as usize;
    let bpl = usize::from(header.bytes_per_line);
    let mut indices = vec![0u8; w];

    for (y, line) in scanlines.chunks_exact(scan_len.max(1)).take(h).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let dst = &mut raster.pixels_mut()[y * w..(y + 1) * w];
        match (header.bpp, header.planes) {
            (8, 3) => {
                let (red, rest) = line.split_at(bpl);
                let (green, blue) = rest.split_at(bpl);
                for (x, px) in dst.iter_mut().enumerate() {
                    *px = RGB8::new(red[x], green[x], blue[x]);
                }
            }
            (8, 1) => {
                if !has_vga && line[..w].iter().any(|&i| i > 15) {
                    return Err(BitmapError::MissingPalette);
                }
                apply_palette(&palette, &line[..w], dst)?;
            }
            (1 | 4, 1) => {
                expand_indices(u16::from(header.bpp), line, &mut indices);
                apply_palette(&palette, &indices, dst)?;
            }
            (bpp, planes) => {
                return Err(BitmapError::InvalidColorEncoding {
                    bpp: u16::from(bpp),
                    planes: u16::from(planes),
                });
            }
        }
    }

    let headers = raster.headers_mut();
    headers.insert("PCX Version", format!("{}", header.version));
    headers.insert("Bpp", format!("{}", header.bpp));
    headers.insert("Size", format!("{}px * {}px", header.width, header.height));
    headers.insert("Color planes", format!("{}", header.planes));
    headers.insert("Bytes per line", format!("{}", header.bytes_per_line));
    headers.insert("Palette", String::from(palette_name));

    Ok(raster)
}

/// Look for the 769-byte trailer (`0x0C` + 768 bytes of R,G,B) at the end of input.
fn read_vga_palette(r: &mut ByteReader<'_>) -> Result<Option<Vec<RGB8>>, BitmapError> {
    let remaining = r.remaining();
    if remaining > VGA_BLOCK_LEN {
        log::warn!(
            "PCX: skipping {} bytes between pixel data and palette trailer",
            remaining - VGA_BLOCK_LEN
        );
        r.skip(remaining - VGA_BLOCK_LEN)?;
    } else if remaining < VGA_BLOCK_LEN {
        return Ok(None);
    }
    if r.read_u8()? != VGA_PALETTE_MARKER {
        return Ok(None);
    }
    let bytes = r.read_bytes(768)?;
    Ok(Some(
        bytes
            .chunks_exact(3)
            .map(|c| RGB8::new(c[0], c[1], c[2]))
            .collect(),
    ))
}

/// Header palette components keep only their top 2 bits.
fn ega_palette(raw: &[u8; 48]) -> Vec<RGB8> {
    raw.chunks_exact(3)
        .map(|c| RGB8::new(c[0] >> 6, c[1] >> 6, c[2] >> 6))
        .collect()
}
