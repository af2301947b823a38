//! BMP encoder: uncompressed 24-bit, BITMAPINFOHEADER, no palette.

use alloc::vec;

use enough::Stop;

use super::decode::FILE_HEADER_LEN;
use crate::error::BitmapError;
use crate::raster::Raster;
use crate::writer::{ByteWriter, Sink};

const INFO_HEADER_LEN: u32 = 40;
/// 72 DPI in pixels per metre.
const RESOLUTION: u32 = 2835;

pub(crate) fn encode_bmp<S: Sink>(
    raster: &Raster,
    out: &mut ByteWriter<S>,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let (width, height) = (raster.width(), raster.height());
    let w = width as usize;
    let h = height as usize;

    let row_stride = w
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let file_size = row_stride
        .checked_mul(h)
        .and_then(|n| n.checked_add((FILE_HEADER_LEN + INFO_HEADER_LEN) as usize))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let raw_size = w
        .checked_mul(h)
        .and_then(|n| n.checked_mul(3))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let stored_width =
        i32::try_from(width).map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
    let stored_height =
        i32::try_from(height).map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;

    stop.check()?;

    // File header (14 bytes)
    out.write_bytes(b"BM")?;
    out.write_u32(file_size)?;
    out.write_zeros(4)?; // reserved
    out.write_u32(FILE_HEADER_LEN + INFO_HEADER_LEN)?; // data offset

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.write_u32(INFO_HEADER_LEN)?;
    out.write_i32(stored_width)?;
    out.write_i32(stored_height)?; // positive = bottom-up
    out.write_u16(1)?; // planes
    out.write_u16(24)?;
    out.write_u32(0)?; // compression
    out.write_u32(raw_size)?;
    out.write_u32(RESOLUTION)?;
    out.write_u32(RESOLUTION)?;
    out.write_u32(0)?; // colors used
    out.write_u32(0)?; // important colors

    let mut row_buf = vec![0u8; row_stride];
    for (i, row) in raster.rows().rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for (bgr, px) in row_buf.chunks_exact_mut(3).zip(row) {
            bgr[0] = px.b;
            bgr[1] = px.g;
            bgr[2] = px.r;
        }
        // Padding bytes past w*3 stay zero.
        out.write_bytes(&row_buf)?;
    }

    Ok(())
}
