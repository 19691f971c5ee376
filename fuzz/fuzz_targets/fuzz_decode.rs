#![no_main]
use imgconv::{BmpPermissiveness, DecodeRequest, Format};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try auto-detect decode (BMP, PPM); must never panic
    let _ = imgconv::decode(data, enough::Unstoppable);

    // Try every BMP strictness level explicitly; must never panic
    for p in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_format(Format::Bmp)
            .with_permissiveness(p)
            .decode(enough::Unstoppable);
    }
    let _ = imgconv::decode_ppm(data, enough::Unstoppable);
});
