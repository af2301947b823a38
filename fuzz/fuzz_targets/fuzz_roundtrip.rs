#![no_main]
use libfuzzer_sys::fuzz_target;
use rasterbits::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive a 24-bit re-encode in both formats unchanged
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let bmp = encode_bmp(&decoded, enough::Unstoppable).expect("BMP encode failed");
    let from_bmp = decode_bmp(&bmp, enough::Unstoppable).expect("BMP re-decode failed");
    assert_eq!(from_bmp.width(), decoded.width());
    assert_eq!(from_bmp.height(), decoded.height());
    assert_eq!(from_bmp.pixels(), decoded.pixels(), "BMP pixels differ");

    // PCX bounding box is 16-bit
    let Ok(pcx) = encode_pcx(&decoded, enough::Unstoppable) else {
        return;
    };
    let from_pcx = decode_pcx(&pcx, enough::Unstoppable).expect("PCX re-decode failed");
    assert_eq!(from_pcx.width(), decoded.width());
    assert_eq!(from_pcx.height(), decoded.height());
    assert_eq!(from_pcx.pixels(), decoded.pixels(), "PCX pixels differ");
});
