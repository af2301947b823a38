use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use rgb::{AsPixels as _, ComponentBytes as _, RGB8};

use crate::error::BitmapError;

/// Fill color for new canvases and for area gained by [`Raster::resized`].
pub const BACKGROUND: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Insertion-ordered diagnostic header fields (`"Bpp" => "8"`, ...).
///
/// Purely informational: encoders never read it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A width×height grid of 24-bit RGB pixels, row-major, top row first.
///
/// Every decoder normalizes into this representation; palettes are resolved
/// during decode and not retained.
///
/// Equality compares dimensions and pixels only. The name and headers are
/// display metadata, so a decoded copy equals the raster it was encoded from.
#[derive(Clone, Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<RGB8>,
    name: String,
    headers: Headers,
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl Eq for Raster {}

impl Raster {
    /// Blank canvas filled with [`BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, BACKGROUND)
    }

    pub fn filled(width: u32, height: u32, color: RGB8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            name: String::from("Unnamed"),
            headers: Headers::new(),
        }
    }

    /// Wrap an existing pixel buffer. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<RGB8>) -> Result<Self, BitmapError> {
        let needed = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        if pixels.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            name: String::from("Unnamed"),
            headers: Headers::new(),
        })
    }

    /// Build from packed `R,G,B` bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BitmapError> {
        if bytes.len() % 3 != 0 {
            return Err(BitmapError::InvalidData(alloc::format!(
                "RGB byte buffer length {} is not a multiple of 3",
                bytes.len()
            )));
        }
        let pixels: &[RGB8] = bytes.as_pixels();
        Self::from_pixels(width, height, pixels.to_vec())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [RGB8] {
        &mut self.pixels
    }

    /// Packed `R,G,B` view of the whole grid.
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    /// Color at `(x, y)`, with `(0, 0)` the top-left corner.
    ///
    /// # Panics
    ///
    /// If `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> RGB8 {
        self.pixels[self.index(x, y)]
    }

    /// # Panics
    ///
    /// If `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: RGB8) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// One row of pixels, `y = 0` being the top row.
    pub fn row(&self, y: u32) -> &[RGB8] {
        assert!(y < self.height, "row {y} out of range for height {}", self.height);
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[RGB8]> + ExactSizeIterator + '_ {
        let w = self.width as usize;
        (0..self.height as usize).map(move |y| &self.pixels[y * w..(y + 1) * w])
    }

    /// New raster of the given size holding the top-left overlap of this one.
    /// Area outside the original is [`BACKGROUND`]. Name is kept, headers are not.
    pub fn resized(&self, width: u32, height: u32) -> Raster {
        let mut out = Raster::new(width, height);
        out.name.clone_from(&self.name);
        let copy_w = width.min(self.width) as usize;
        let copy_h = height.min(self.height) as usize;
        let (src_w, dst_w) = (self.width as usize, width as usize);
        for y in 0..copy_h {
            out.pixels[y * dst_w..y * dst_w + copy_w]
                .copy_from_slice(&self.pixels[y * src_w..y * src_w + copy_w]);
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of range for {}x{} raster",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Zero-copy 2D view of the pixel grid.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGB8> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Copy into an owned [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGB8> {
        imgref::ImgVec::new(
            self.pixels.clone(),
            self.width as usize,
            self.height as usize,
        )
    }
}
