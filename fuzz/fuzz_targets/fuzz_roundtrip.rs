#![no_main]
use imgconv::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let reencoded = match Format::detect(data) {
        Some(Format::Bmp) => encode_bmp(&decoded, enough::Unstoppable),
        Some(Format::Ppm) => encode_ppm(&decoded, enough::Unstoppable),
        _ => return,
    };

    let Ok(reencoded) = reencoded else { return };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
});
