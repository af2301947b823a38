//! Sub-byte index unpacking shared by the BMP and PCX decoders.
//!
//! Adapted from the bit expansion in zune-bmp 0.5.2 by Caleb Etemesi (MIT/Apache-2.0/Zlib).

use rgb::RGB8;

use crate::error::BitmapError;

/// Unpack `out.len()` palette indices from packed `input`, most significant
/// bits first. `depth` is 1, 4 or 8; any other value leaves `out` untouched.
pub(crate) fn expand_indices(depth: u16, input: &[u8], out: &mut [u8]) {
    match depth {
        1 => {
            let mut in_iter = input.iter();
            let mut out_iter = out.chunks_exact_mut(8);

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, &in_val)| {
                    for (bit, v) in out_vals.iter_mut().enumerate() {
                        *v = (in_val >> (7 - bit)) & 0x01;
                    }
                });

            if let Some(&in_val) = in_iter.next() {
                for (pos, v) in out_iter.into_remainder().iter_mut().enumerate() {
                    *v = (in_val >> (7 - pos)) & 0x01;
                }
            }
        }
        4 => {
            let mut in_iter = input.iter();
            let mut out_iter = out.chunks_exact_mut(2);

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, &in_val)| {
                    out_vals[0] = in_val >> 4;
                    out_vals[1] = in_val & 0x0f;
                });

            if let Some(&in_val) = in_iter.next() {
                if let Some(v) = out_iter.into_remainder().first_mut() {
                    *v = in_val >> 4;
                }
            }
        }
        8 => {
            let n = out.len().min(input.len());
            out[..n].copy_from_slice(&input[..n]);
        }
        _ => {}
    }
}

/// Bytes needed to hold `width` packed pixels of `depth` bits.
pub(crate) fn packed_len(depth: u16, width: usize) -> usize {
    (width * depth as usize).div_ceil(8)
}

/// Resolve indices through `palette` into `out`.
pub(crate) fn apply_palette(
    palette: &[RGB8],
    indices: &[u8],
    out: &mut [RGB8],
) -> Result<(), BitmapError> {
    for (dst, &idx) in out.iter_mut().zip(indices) {
        *dst = *palette.get(usize::from(idx)).ok_or_else(|| {
            BitmapError::InvalidData(alloc::format!(
                "palette index {idx} beyond {} palette entries",
                palette.len()
            ))
        })?;
    }
    Ok(())
}
