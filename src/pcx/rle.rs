//! PCX byte-oriented run-length coding.
//!
//! A byte with both top bits set is a control byte: its low 6 bits are a
//! repeat count for the byte that follows. Any other byte is a literal.

use crate::error::BitmapError;
use crate::reader::ByteReader;
use crate::writer::{ByteWriter, Sink};

const RUN_FLAG: u8 = 0xC0;
const MAX_RUN: usize = 0x3F;

/// Fill `line` from the compressed stream. A run that would overflow the
/// scanline is cut at its end.
pub(crate) fn decode_scanline(r: &mut ByteReader<'_>, line: &mut [u8]) -> Result<(), BitmapError> {
    let mut i = 0;
    while i < line.len() {
        let b = r.read_u8()?;
        let (count, value) = if b & RUN_FLAG == RUN_FLAG {
            (usize::from(b & 0x3F), r.read_u8()?)
        } else {
            (1, b)
        };
        let end = (i + count).min(line.len());
        line[i..end].fill(value);
        i = end;
    }
    Ok(())
}

/// Compress one scanline.
pub(crate) fn encode_scanline<S: Sink>(
    line: &[u8],
    out: &mut ByteWriter<S>,
) -> Result<(), BitmapError> {
    let mut i = 0;
    while i < line.len() {
        let value = line[i];
        let run = line[i..]
            .iter()
            .take(MAX_RUN)
            .take_while(|&&b| b == value)
            .count();
        if run > 1 {
            out.write_u8(RUN_FLAG | run as u8)?;
            out.write_u8(value)?;
        } else {
            // A lone byte that looks like a control byte needs an explicit 1-run.
            if value & RUN_FLAG == RUN_FLAG {
                out.write_u8(RUN_FLAG | 1)?;
            }
            out.write_u8(value)?;
        }
        i += run;
    }
    Ok(())
}
