//! PCX encoder: version 5, RLE, 8 bpp × 3 planes (true color, no palette).

use alloc::vec;

use enough::Stop;

use super::decode::{ENCODING_RLE, MANUFACTURER};
use super::rle;
use crate::error::BitmapError;
use crate::raster::Raster;
use crate::writer::{ByteWriter, Sink};

const VERSION: u8 = 5;
const DPI: u16 = 600;
/// Largest side the signed 16-bit bounding box can express from origin 0.
const MAX_SIDE: u32 = 1 << 15;

pub(crate) fn encode_pcx<S: Sink>(
    raster: &Raster,
    out: &mut ByteWriter<S>,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let (width, height) = (raster.width(), raster.height());
    if width > MAX_SIDE || height > MAX_SIDE {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    }
    let w = width as usize;
    // Bounding box is inclusive; a 0-wide image stores x_end = -1.
    let x_end = (width as i32 - 1) as i16;
    let y_end = (height as i32 - 1) as i16;
    let bytes_per_line = width as u16;

    stop.check()?;

    out.write_u8(MANUFACTURER)?;
    out.write_u8(VERSION)?;
    out.write_u8(ENCODING_RLE)?;
    out.write_u8(8)?; // bpp per plane
    out.write_i16(0)?; // x_start
    out.write_i16(0)?; // y_start
    out.write_i16(x_end)?;
    out.write_i16(y_end)?;
    out.write_u16(DPI)?;
    out.write_u16(DPI)?;
    out.write_zeros(48)?; // EGA palette
    out.write_u8(0)?; // reserved
    out.write_u8(3)?; // planes
    out.write_u16(bytes_per_line)?;
    out.write_u16(1)?; // palette type: color
    out.write_u16(width as u16)?; // screen size
    out.write_u16(height as u16)?;
    out.write_zeros(54)?;

    // Scanline = red plane, green plane, blue plane.
    let mut line = vec![0u8; 3 * w];
    for (y, row) in raster.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let (red, rest) = line.split_at_mut(w);
        let (green, blue) = rest.split_at_mut(w);
        for (x, px) in row.iter().enumerate() {
            red[x] = px.r;
            green[x] = px.g;
            blue[x] = px.b;
        }
        rle::encode_scanline(&line, out)?;
    }

    Ok(())
}
