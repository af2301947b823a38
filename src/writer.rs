//! Sequential little-endian writer over a byte sink.

use alloc::vec::Vec;

use crate::error::BitmapError;

/// Destination for encoded bytes.
pub trait Sink {
    fn put(&mut self, bytes: &[u8]) -> Result<(), BitmapError>;

    fn flush(&mut self) -> Result<(), BitmapError> {
        Ok(())
    }
}

impl Sink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Adapter writing to any [`std::io::Write`].
#[cfg(feature = "std")]
pub struct IoSink<W: std::io::Write>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for IoSink<W> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        self.0.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), BitmapError> {
        self.0.flush()?;
        Ok(())
    }
}

pub struct ByteWriter<S: Sink> {
    sink: S,
}

impl<S: Sink> ByteWriter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        self.sink.put(bytes)
    }

    /// Emit `n` zero bytes (row padding, reserved header fields).
    pub fn write_zeros(&mut self, n: usize) -> Result<(), BitmapError> {
        const ZEROS: [u8; 64] = [0; 64];
        let mut left = n;
        while left > 0 {
            let chunk = left.min(ZEROS.len());
            self.sink.put(&ZEROS[..chunk])?;
            left -= chunk;
        }
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> Result<(), BitmapError> {
        self.sink.put(&[v])
    }

    pub fn write_i8(&mut self, v: i8) -> Result<(), BitmapError> {
        self.sink.put(&v.to_le_bytes())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<(), BitmapError> {
        self.sink.put(&v.to_le_bytes())
    }

    pub fn write_i16(&mut self, v: i16) -> Result<(), BitmapError> {
        self.sink.put(&v.to_le_bytes())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<(), BitmapError> {
        self.sink.put(&v.to_le_bytes())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<(), BitmapError> {
        self.sink.put(&v.to_le_bytes())
    }

    pub fn write_u64(&mut self, v: u64) -> Result<(), BitmapError> {
        self.sink.put(&v.to_le_bytes())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<(), BitmapError> {
        self.sink.put(&v.to_le_bytes())
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> Result<S, BitmapError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
