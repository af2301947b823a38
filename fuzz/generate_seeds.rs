#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), &bmp).unwrap();

    // BMP 2x2 1-bit, core header, black/white palette
    let mut core = vec![0u8; 14 + 12 + 6 + 8];
    core[0] = b'B'; core[1] = b'M';
    core[2..6].copy_from_slice(&40u32.to_le_bytes());
    core[10..14].copy_from_slice(&32u32.to_le_bytes());
    core[14..18].copy_from_slice(&12u32.to_le_bytes());
    core[18..20].copy_from_slice(&2i16.to_le_bytes());
    core[20..22].copy_from_slice(&(-2i16).to_le_bytes()); // top-down
    core[22..24].copy_from_slice(&1u16.to_le_bytes());
    core[24..26].copy_from_slice(&1u16.to_le_bytes());
    core[29..32].copy_from_slice(&[0xff, 0xff, 0xff]); // entry 1
    core[32] = 0b1000_0000;
    core[36] = 0b0100_0000;
    fs::write(format!("{dir}/bmp_core_1bit.bmp"), &core).unwrap();

    // PCX 2x1 true color, 3 planes
    let mut pcx = pcx_header(8, 3, 2, 1, 2);
    pcx.extend_from_slice(&[0xC2, 0xFF, 0x00, 0x80, 0xC1, 0xC0, 0x10]);
    fs::write(format!("{dir}/pcx_rgb_2x1.pcx"), &pcx).unwrap();

    // PCX 2x1 8-bit with VGA palette
    let mut vga = pcx_header(8, 1, 2, 1, 2);
    vga.extend_from_slice(&[0x05, 0xC1, 0xF0]);
    vga.push(0x0C);
    vga.extend((0..768).map(|i| (i % 256) as u8));
    fs::write(format!("{dir}/pcx_vga_2x1.pcx"), &vga).unwrap();

    // PCX 8x1 1-bit with EGA palette
    let mut mono = pcx_header(1, 1, 8, 1, 2);
    mono[19..22].copy_from_slice(&[0xff, 0xff, 0xff]);
    mono.extend_from_slice(&[0xAA, 0x00]);
    fs::write(format!("{dir}/pcx_mono_8x1.pcx"), &mono).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/pcx_short.bin"), b"\x0a\x05\x01\x08").unwrap();
    fs::write(format!("{dir}/bmp_no_pixels.bin"), &bmp[..54]).unwrap();

    println!("Generated seed corpus in {dir}/");
}

fn pcx_header(bpp: u8, planes: u8, width: u16, height: u16, bytes_per_line: u16) -> Vec<u8> {
    let mut h = vec![0x0A, 5, 1, bpp, 0, 0, 0, 0];
    h.extend_from_slice(&(width - 1).to_le_bytes());
    h.extend_from_slice(&(height - 1).to_le_bytes());
    h.resize(65, 0);
    h.push(planes);
    h.extend_from_slice(&bytes_per_line.to_le_bytes());
    h.resize(128, 0);
    h
}
