//! Hand-built BMP and PCX files covering header variants, bit depths,
//! palettes and failure modes.

use rasterbits::*;

const WHITE: RGB8 = RGB8::new(255, 255, 255);
const BLACK: RGB8 = RGB8::new(0, 0, 0);

// ── BMP fixture builder ──────────────────────────────────────────────

/// Assemble a BMP. `rows` are in file order and get padded to 4 bytes with
/// 0xEE so a decoder that ignores padding shows up as wrong pixels.
fn bmp_file(
    dib_len: u32,
    width: i32,
    height: i32,
    bpp: u16,
    palette: &[RGB8],
    declared_palette_len: u32,
    rows: &[Vec<u8>],
) -> Vec<u8> {
    let core = dib_len == 12 || dib_len == 64;
    let entry_len = if core { 3 } else { 4 };
    let row_bytes = (bpp as usize * width as usize).div_ceil(32) * 4;
    let offset = 14 + dib_len + (palette.len() * entry_len) as u32;

    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + (row_bytes * rows.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&offset.to_le_bytes());

    let dib_start = out.len();
    out.extend_from_slice(&dib_len.to_le_bytes());
    if core {
        out.extend_from_slice(&(width as i16).to_le_bytes());
        out.extend_from_slice(&(height as i16).to_le_bytes());
    } else {
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
    }
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    if !core {
        out.extend_from_slice(&0u32.to_le_bytes()); // compression
        out.extend_from_slice(&0u32.to_le_bytes()); // raw size
        out.extend_from_slice(&[0; 8]); // resolution
        out.extend_from_slice(&declared_palette_len.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
    }
    out.resize(dib_start + dib_len as usize, 0);

    for c in palette {
        out.extend_from_slice(&[c.b, c.g, c.r]);
        if !core {
            out.push(0);
        }
    }
    for row in rows {
        let start = out.len();
        out.extend_from_slice(row);
        out.resize(start + row_bytes, 0xEE);
    }
    out
}

// ── BMP decode ───────────────────────────────────────────────────────

#[test]
fn bmp_2x2_24bit_reference_file() {
    #[rustfmt::skip]
    let data: Vec<u8> = vec![
        // file header
        b'B', b'M', 70, 0, 0, 0, 0, 0, 0, 0, 54, 0, 0, 0,
        // BITMAPINFOHEADER
        40, 0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0, 1, 0, 24, 0,
        0, 0, 0, 0, 16, 0, 0, 0, 0x13, 0x0b, 0, 0, 0x13, 0x0b, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,
        // bottom row: blue, white, pad
        0xff, 0x00, 0x00, 0xff, 0xff, 0xff, 0, 0,
        // top row: red, green, pad
        0x00, 0x00, 0xff, 0x00, 0xff, 0x00, 0, 0,
    ];
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.width(), 2);
    assert_eq!(r.height(), 2);
    assert_eq!(r.pixel(0, 0), RGB8::new(255, 0, 0));
    assert_eq!(r.pixel(1, 0), RGB8::new(0, 255, 0));
    assert_eq!(r.pixel(0, 1), RGB8::new(0, 0, 255));
    assert_eq!(r.pixel(1, 1), WHITE);
}

#[test]
fn bmp_24bit_odd_width_skips_padding() {
    // 3 px * 3 bytes = 9, padded to 12
    let rows = vec![
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
        vec![10, 11, 12, 13, 14, 15, 16, 17, 18],
    ];
    let data = bmp_file(40, 3, 2, 24, &[], 0, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    // second stored row is the top row
    assert_eq!(r.pixel(0, 0), RGB8::new(12, 11, 10));
    assert_eq!(r.pixel(2, 0), RGB8::new(18, 17, 16));
    assert_eq!(r.pixel(0, 1), RGB8::new(3, 2, 1));
    assert_eq!(r.pixel(2, 1), RGB8::new(9, 8, 7));
}

#[test]
fn bmp_1bit_msb_first() {
    let palette = [RGB8::new(10, 20, 30), RGB8::new(200, 100, 50)];
    // 10 pixels: 1011000011
    let rows = vec![vec![0b1011_0000, 0b1100_0000]];
    let data = bmp_file(40, 10, 1, 1, &palette, 2, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    let expect = [1, 0, 1, 1, 0, 0, 0, 0, 1, 1];
    for (x, &i) in expect.iter().enumerate() {
        assert_eq!(r.pixel(x as u32, 0), palette[i], "pixel {x}");
    }
    assert_eq!(r.headers().get("Palette"), Some("2 colors"));
}

#[test]
fn bmp_4bit_core_header_defaults_to_16_entries() {
    let palette: Vec<RGB8> = (0..16u8).map(|i| RGB8::new(i, i * 2, i * 3)).collect();
    let rows = vec![vec![0x0F, 0x70]];
    let data = bmp_file(12, 3, 1, 4, &palette, 0, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), palette[0]);
    assert_eq!(r.pixel(1, 0), palette[15]);
    assert_eq!(r.pixel(2, 0), palette[7]);
    assert_eq!(r.headers().get("Header type"), Some("BITMAPCOREHEADER"));
}

#[test]
fn bmp_8bit_declared_palette_count() {
    let palette = [BLACK, RGB8::new(1, 2, 3), RGB8::new(250, 251, 252)];
    let rows = vec![vec![2, 1], vec![0, 2]];
    let data = bmp_file(40, 2, 2, 8, &palette, 3, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), BLACK);
    assert_eq!(r.pixel(1, 0), palette[2]);
    assert_eq!(r.pixel(0, 1), palette[2]);
    assert_eq!(r.pixel(1, 1), palette[1]);
}

#[test]
fn bmp_8bit_os2_64_byte_header_uses_3_byte_entries() {
    let palette: Vec<RGB8> = (0..=255u8).map(|i| RGB8::new(i, 255 - i, 7)).collect();
    let rows = vec![vec![0, 128, 255]];
    let data = bmp_file(64, 3, 1, 8, &palette, 0, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), RGB8::new(0, 255, 7));
    assert_eq!(r.pixel(1, 0), RGB8::new(128, 127, 7));
    assert_eq!(r.pixel(2, 0), RGB8::new(255, 0, 7));
}

#[test]
fn bmp_v5_header_skips_extension_fields() {
    let rows = vec![vec![0x33, 0x22, 0x11]];
    let data = bmp_file(124, 1, 1, 24, &[], 0, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), RGB8::new(0x11, 0x22, 0x33));
    assert_eq!(r.headers().get("Header type"), Some("BITMAPV5HEADER"));
}

#[test]
fn bmp_v4_header_with_palette() {
    let palette = [RGB8::new(9, 8, 7), RGB8::new(1, 1, 1)];
    let rows = vec![vec![0b0100_0000]];
    let data = bmp_file(108, 2, 1, 1, &palette, 2, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), palette[0]);
    assert_eq!(r.pixel(1, 0), palette[1]);
}

#[test]
fn bmp_negative_height_is_top_down() {
    let rows = vec![vec![0, 0, 255], vec![255, 0, 0]];
    let data = bmp_file(40, 1, -2, 24, &[], 0, &rows);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.height(), 2);
    assert_eq!(r.pixel(0, 0), RGB8::new(255, 0, 0));
    assert_eq!(r.pixel(0, 1), RGB8::new(0, 0, 255));
    assert_eq!(r.headers().get("Row order"), Some("top-down"));
}

#[test]
fn bmp_gap_after_header_is_skipped_for_24bit() {
    let rows = vec![vec![1, 2, 3]];
    let mut data = bmp_file(40, 1, 1, 24, &[], 0, &rows);
    // Insert 8 junk bytes before the pixels and move the offset.
    data.splice(54..54, [0xAB; 8]);
    data[10..14].copy_from_slice(&62u32.to_le_bytes());
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), RGB8::new(3, 2, 1));
}

#[test]
fn bmp_headers_in_order() {
    let data = bmp_file(40, 1, 1, 24, &[], 0, &[vec![0, 0, 0]]);
    let r = decode_bmp(&data, Unstoppable).unwrap();
    let keys: Vec<&str> = r.headers().iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        [
            "Signature",
            "File length",
            "Header length",
            "Header type",
            "Size",
            "Bpp",
            "Raw size",
            "Palette",
            "Row order"
        ]
    );
    assert_eq!(r.headers().get("Size"), Some("1px * 1px"));
    assert_eq!(r.headers().get("Raw size"), Some("4"));
}

// ── BMP errors ───────────────────────────────────────────────────────

#[test]
fn bmp_bad_signature() {
    let mut data = bmp_file(40, 1, 1, 24, &[], 0, &[vec![0, 0, 0]]);
    data[1] = b'A';
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidSignature)
    ));
}

#[test]
fn bmp_compressed_is_rejected() {
    let mut data = bmp_file(40, 1, 1, 8, &[BLACK], 1, &[vec![0]]);
    data[30..34].copy_from_slice(&1u32.to_le_bytes()); // BI_RLE8
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::UnsupportedCompression(1))
    ));
}

#[test]
fn bmp_unsupported_bpp() {
    for bpp in [16u16, 32] {
        let data = bmp_file(40, 1, 1, bpp, &[], 0, &[vec![0, 0, 0, 0]]);
        match decode_bmp(&data, Unstoppable) {
            Err(BitmapError::UnsupportedBpp(b)) => assert_eq!(b, bpp),
            other => panic!("bpp {bpp}: expected UnsupportedBpp, got {other:?}"),
        }
    }
    // Paletted but not a supported depth
    let palette = [BLACK, WHITE, BLACK, WHITE];
    let data = bmp_file(40, 4, 1, 2, &palette, 4, &[vec![0b0001_1011]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::UnsupportedBpp(2))
    ));
}

#[test]
fn bmp_compression_reported_before_bit_depth() {
    let mut data = bmp_file(40, 1, 1, 32, &[], 0, &[vec![0, 0, 0, 0]]);
    data[30..34].copy_from_slice(&3u32.to_le_bytes()); // BI_BITFIELDS
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::UnsupportedCompression(3))
    ));
}

#[test]
fn bmp_missing_palette_reported_before_bit_depth() {
    let data = bmp_file(40, 1, 1, 2, &[], 0, &[vec![0]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::MissingPalette)
    ));
}

#[test]
fn bmp_zero_width_tall_image_decodes_immediately() {
    let data = bmp_file(40, 0, i32::MAX, 24, &[], 0, &[]);
    assert_eq!(data.len(), 54);
    let start = std::time::Instant::now();
    let r = decode_bmp(&data, Unstoppable).unwrap();
    assert_eq!(r.width(), 0);
    assert_eq!(r.height(), i32::MAX as u32);
    assert!(r.pixels().is_empty());
    assert!(start.elapsed() < std::time::Duration::from_secs(1));
}

#[test]
fn bmp_planes_must_be_one() {
    let mut data = bmp_file(40, 1, 1, 24, &[], 0, &[vec![0, 0, 0]]);
    data[26..28].copy_from_slice(&2u16.to_le_bytes());
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::UnsupportedPlanes { planes: 2, .. })
    ));
}

#[test]
fn bmp_unknown_dib_length() {
    let mut data = bmp_file(40, 1, 1, 24, &[], 0, &[vec![0, 0, 0]]);
    data[14..18].copy_from_slice(&52u32.to_le_bytes());
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::MalformedHeader(_))
    ));
}

#[test]
fn bmp_paletted_without_palette() {
    let data = bmp_file(40, 2, 1, 8, &[], 0, &[vec![0, 1]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::MissingPalette)
    ));
}

#[test]
fn bmp_offset_inside_header() {
    let mut data = bmp_file(40, 1, 1, 24, &[], 0, &[vec![0, 0, 0]]);
    data[10..14].copy_from_slice(&20u32.to_le_bytes());
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::MalformedHeader(_))
    ));
}

#[test]
fn bmp_index_beyond_palette() {
    let data = bmp_file(40, 1, 1, 8, &[BLACK, WHITE], 2, &[vec![5]]);
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BitmapError::InvalidData(_))
    ));
}

#[test]
fn bmp_truncated_everywhere() {
    let data = bmp_file(40, 3, 3, 24, &[], 0, &[vec![7; 9], vec![8; 9], vec![9; 9]]);
    assert!(decode_bmp(&data, Unstoppable).is_ok());
    for len in 0..data.len() {
        match decode_bmp(&data[..len], Unstoppable) {
            Err(BitmapError::UnexpectedEof) => {}
            other => panic!("len {len}: expected UnexpectedEof, got {other:?}"),
        }
    }
}

// ── PCX fixture builder ──────────────────────────────────────────────

/// Literal-only RLE: valid for any decoder, escapes bytes >= 0xC0.
fn rle_literal(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for &b in raw {
        if b >= 0xC0 {
            out.push(0xC1);
        }
        out.push(b);
    }
    out
}

struct PcxFixture {
    bpp: u8,
    planes: u8,
    width: u16,
    height: u16,
    bytes_per_line: u16,
    ega: [u8; 48],
}

impl PcxFixture {
    fn new(bpp: u8, planes: u8, width: u16, height: u16, bytes_per_line: u16) -> Self {
        Self {
            bpp,
            planes,
            width,
            height,
            bytes_per_line,
            ega: [0; 48],
        }
    }

    fn header(&self) -> Vec<u8> {
        let mut h = vec![0x0A, 5, 1, self.bpp];
        h.extend_from_slice(&0u16.to_le_bytes());
        h.extend_from_slice(&0u16.to_le_bytes());
        h.extend_from_slice(&(self.width as i16 - 1).to_le_bytes());
        h.extend_from_slice(&(self.height as i16 - 1).to_le_bytes());
        h.extend_from_slice(&[0; 4]);
        h.extend_from_slice(&self.ega);
        h.push(0);
        h.push(self.planes);
        h.extend_from_slice(&self.bytes_per_line.to_le_bytes());
        h.resize(128, 0);
        h
    }

    /// Header + literal-RLE scanlines + trailer.
    fn file(&self, scanlines: &[Vec<u8>], trailer: &[u8]) -> Vec<u8> {
        let mut out = self.header();
        for line in scanlines {
            assert_eq!(
                line.len(),
                self.planes as usize * self.bytes_per_line as usize
            );
            out.extend(rle_literal(line));
        }
        out.extend_from_slice(trailer);
        out
    }
}

fn vga_trailer(palette: impl Fn(u8) -> RGB8) -> Vec<u8> {
    let mut t = vec![0x0C];
    for i in 0..=255u8 {
        let c = palette(i);
        t.extend_from_slice(&[c.r, c.g, c.b]);
    }
    t
}

fn vga_color(i: u8) -> RGB8 {
    RGB8::new(i, 255 - i, i / 2)
}

// ── PCX decode ───────────────────────────────────────────────────────

#[test]
fn pcx_8bit_vga_palette() {
    let f = PcxFixture::new(8, 1, 3, 2, 4);
    let data = f.file(
        &[vec![0, 200, 255, 0x99], vec![16, 17, 0xC0, 0]],
        &vga_trailer(vga_color),
    );
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert_eq!((r.width(), r.height()), (3, 2));
    assert_eq!(r.pixel(0, 0), vga_color(0));
    assert_eq!(r.pixel(1, 0), vga_color(200));
    assert_eq!(r.pixel(2, 0), vga_color(255));
    assert_eq!(r.pixel(2, 1), vga_color(0xC0));
    assert_eq!(r.headers().get("Palette"), Some("VGA"));
}

#[test]
fn pcx_vga_palette_after_excess_bytes() {
    let f = PcxFixture::new(8, 1, 2, 1, 2);
    let mut trailer = vec![0x55; 37];
    trailer.extend(vga_trailer(vga_color));
    let data = f.file(&[vec![3, 250]], &trailer);
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), vga_color(3));
    assert_eq!(r.pixel(1, 0), vga_color(250));
}

#[test]
fn pcx_8bit_falls_back_to_ega_without_marker() {
    let mut f = PcxFixture::new(8, 1, 2, 1, 2);
    f.ega[3..6].copy_from_slice(&[0xC0, 0x40, 0x00]); // entry 1
    f.ega[45..48].copy_from_slice(&[0xFF, 0xFF, 0x80]); // entry 15
    // 769 trailing bytes, wrong marker
    let mut trailer = vga_trailer(vga_color);
    trailer[0] = 0x0B;
    let data = f.file(&[vec![1, 15]], &trailer);
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), RGB8::new(3, 1, 0));
    assert_eq!(r.pixel(1, 0), RGB8::new(3, 3, 2));
    assert_eq!(r.headers().get("Palette"), Some("EGA"));
}

#[test]
fn pcx_8bit_high_index_needs_vga_palette() {
    let f = PcxFixture::new(8, 1, 2, 1, 2);
    let data = f.file(&[vec![1, 16]], &[]);
    assert!(matches!(
        decode_pcx(&data, Unstoppable),
        Err(BitmapError::MissingPalette)
    ));
}

#[test]
fn pcx_1bit_ega() {
    let mut f = PcxFixture::new(1, 1, 10, 1, 2);
    f.ega[3..6].copy_from_slice(&[0xFF, 0xFF, 0xFF]);
    let data = f.file(&[vec![0b1000_0001, 0b0100_0000]], &[]);
    let r = decode_pcx(&data, Unstoppable).unwrap();
    let on = RGB8::new(3, 3, 3);
    let expect = [on, BLACK, BLACK, BLACK, BLACK, BLACK, BLACK, on, BLACK, on];
    assert_eq!(r.pixels(), &expect);
}

#[test]
fn pcx_4bit_ega() {
    let mut f = PcxFixture::new(4, 1, 3, 1, 2);
    for i in 0..16 {
        f.ega[i * 3] = (i as u8) << 4; // red top bits carry i >> 2
    }
    let data = f.file(&[vec![0x4C, 0xF0]], &[]);
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), RGB8::new(4 >> 2, 0, 0));
    assert_eq!(r.pixel(1, 0), RGB8::new(12 >> 2, 0, 0));
    assert_eq!(r.pixel(2, 0), RGB8::new(15 >> 2, 0, 0));
}

#[test]
fn pcx_4bit_with_vga_trailer_uses_vga() {
    let f = PcxFixture::new(4, 1, 2, 1, 1);
    let data = f.file(&[vec![0x2F]], &vga_trailer(vga_color));
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), vga_color(2));
    assert_eq!(r.pixel(1, 0), vga_color(15));
}

#[test]
fn pcx_true_color_planes() {
    let f = PcxFixture::new(8, 3, 2, 1, 3);
    // bytes_per_line 3 > width 2: one padding byte per plane
    let line = vec![10, 20, 0, 30, 40, 0, 50, 60, 0];
    let data = f.file(&[line], &[]);
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), RGB8::new(10, 30, 50));
    assert_eq!(r.pixel(1, 0), RGB8::new(20, 40, 60));
    assert_eq!(r.headers().get("Palette"), Some("none"));
}

#[test]
fn pcx_true_color_ignores_trailing_palette() {
    let f = PcxFixture::new(8, 3, 1, 1, 1);
    let data = f.file(&[vec![1, 2, 3]], &vga_trailer(vga_color));
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert_eq!(r.pixel(0, 0), RGB8::new(1, 2, 3));
}

#[test]
fn pcx_runs_span_planes() {
    let f = PcxFixture::new(8, 3, 2, 1, 2);
    let mut data = f.header();
    // 6 bytes of 0x80 in one run, covering all three planes
    data.extend_from_slice(&[0xC6, 0x80]);
    let r = decode_pcx(&data, Unstoppable).unwrap();
    assert!(r.pixels().iter().all(|&p| p == RGB8::new(0x80, 0x80, 0x80)));
}

#[test]
fn pcx_headers_in_order() {
    let f = PcxFixture::new(8, 3, 1, 1, 1);
    let r = decode_pcx(&f.file(&[vec![0, 0, 0]], &[]), Unstoppable).unwrap();
    let keys: Vec<&str> = r.headers().iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        [
            "PCX Version",
            "Bpp",
            "Size",
            "Color planes",
            "Bytes per line",
            "Palette"
        ]
    );
    assert_eq!(r.headers().get("PCX Version"), Some("5"));
}

// ── PCX errors ───────────────────────────────────────────────────────

#[test]
fn pcx_bad_manufacturer() {
    let mut data = PcxFixture::new(8, 3, 1, 1, 1).file(&[vec![0, 0, 0]], &[]);
    data[0] = 0x0B;
    assert!(matches!(
        decode_pcx(&data, Unstoppable),
        Err(BitmapError::InvalidSignature)
    ));
}

#[test]
fn pcx_non_rle_encoding() {
    let mut data = PcxFixture::new(8, 3, 1, 1, 1).file(&[vec![0, 0, 0]], &[]);
    data[2] = 0;
    assert!(matches!(
        decode_pcx(&data, Unstoppable),
        Err(BitmapError::UnsupportedEncoding(0))
    ));
}

#[test]
fn pcx_plane_combinations() {
    for (bpp, planes) in [(1u8, 4u8), (4, 3), (1, 3), (8, 2), (8, 4), (16, 1), (24, 1), (255, 1)] {
        let data = PcxFixture::new(bpp, planes, 1, 1, 4).header();
        match decode_pcx(&data, Unstoppable) {
            Err(BitmapError::UnsupportedPlanes { .. }) => {}
            other => panic!("{bpp}x{planes}: expected UnsupportedPlanes, got {other:?}"),
        }
    }
}

#[test]
fn pcx_single_plane_odd_depth() {
    for bpp in [0u8, 2, 3, 5, 6, 7] {
        let data = PcxFixture::new(bpp, 1, 4, 1, 1).file(&[vec![0]], &[]);
        match decode_pcx(&data, Unstoppable) {
            Err(BitmapError::InvalidColorEncoding { bpp: b, planes: 1 }) => {
                assert_eq!(b, u16::from(bpp))
            }
            other => panic!("bpp {bpp}: expected InvalidColorEncoding, got {other:?}"),
        }
    }
}

#[test]
fn pcx_bytes_per_line_too_small() {
    let data = PcxFixture::new(8, 1, 5, 1, 4).header();
    assert!(matches!(
        decode_pcx(&data, Unstoppable),
        Err(BitmapError::MalformedHeader(_))
    ));
}

#[test]
fn pcx_inverted_bounding_box() {
    let mut data = PcxFixture::new(8, 1, 1, 1, 1).header();
    data[4..6].copy_from_slice(&10i16.to_le_bytes()); // x_start beyond x_end
    assert!(matches!(
        decode_pcx(&data, Unstoppable),
        Err(BitmapError::MalformedHeader(_))
    ));
}

#[test]
fn pcx_truncated_body() {
    let f = PcxFixture::new(8, 3, 4, 4, 4);
    let lines: Vec<Vec<u8>> = (0..4).map(|y| vec![y as u8; 12]).collect();
    let data = f.file(&lines, &[]);
    assert!(decode_pcx(&data, Unstoppable).is_ok());
    for len in 0..data.len() {
        match decode_pcx(&data[..len], Unstoppable) {
            Err(BitmapError::UnexpectedEof) => {}
            other => panic!("len {len}: expected UnexpectedEof, got {other:?}"),
        }
    }
}

// ── Auto-detection and probing ───────────────────────────────────────

#[test]
fn decode_detects_both_formats() {
    let bmp = bmp_file(40, 1, 1, 24, &[], 0, &[vec![1, 2, 3]]);
    let pcx = PcxFixture::new(8, 3, 1, 1, 1).file(&[vec![3, 2, 1]], &[]);
    assert_eq!(decode(&bmp, Unstoppable).unwrap().pixel(0, 0), RGB8::new(3, 2, 1));
    assert_eq!(decode(&pcx, Unstoppable).unwrap().pixel(0, 0), RGB8::new(3, 2, 1));
    assert!(matches!(
        decode(b"P6\n1 1\n255\n", Unstoppable),
        Err(BitmapError::UnrecognizedFormat)
    ));
}

#[test]
fn probe_reports_header_fields() {
    let bmp = bmp_file(40, 7, -3, 8, &[BLACK], 1, &[vec![0; 7], vec![0; 7], vec![0; 7]]);
    let info = ImageInfo::from_bytes(&bmp).unwrap();
    assert_eq!(info.format, ImageFormat::Bmp);
    assert_eq!((info.width, info.height), (7, 3));
    assert_eq!(info.bits_per_pixel, 8);

    let pcx = PcxFixture::new(8, 3, 9, 4, 10).header();
    let info = ImageInfo::from_bytes(&pcx).unwrap();
    assert_eq!(info.format, ImageFormat::Pcx);
    assert_eq!((info.width, info.height), (9, 4));
    assert_eq!(info.bits_per_pixel, 24);
    assert_eq!(info.planes, 3);
}
