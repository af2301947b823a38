#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Auto-detect, then each format forced: must never panic
    let _ = rasterbits::decode(data, enough::Unstoppable);
    let _ = rasterbits::decode_bmp(data, enough::Unstoppable);
    let _ = rasterbits::decode_pcx(data, enough::Unstoppable);
    let _ = rasterbits::ImageInfo::from_bytes(data);
});
