//! Test corpus: roundtrip tests with various patterns and sizes, plus
//! path-level load/save through the format dispatcher.

use std::path::Path;

use enough::Unstoppable;
use imgconv::*;

fn noise_pattern(w: usize, h: usize) -> Image {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    let pixels = (0..w * h)
        .map(|_| Color::new(next(), next(), next()))
        .collect();
    Image::from_pixels(w, h, pixels).unwrap()
}

fn gradient(w: usize, h: usize) -> Image {
    let mut img = Image::new(w, h, BLACK);
    for y in 0..h {
        for (x, px) in img.row_mut(y).iter_mut().enumerate() {
            *px = Color::new((x * 255 / w.max(1)) as u8, (y * 255 / h.max(1)) as u8, 77);
        }
    }
    img
}

// ── BMP roundtrips ───────────────────────────────────────────────────

#[test]
fn bmp_roundtrip_every_padding_class() {
    // Widths 1..=8 cover row padding of 1, 2, 3 and 0 bytes twice over.
    for w in 1..=8 {
        for h in [1, 2, 5] {
            let img = noise_pattern(w, h);
            let encoded = encode_bmp(&img, Unstoppable).unwrap();
            assert_eq!(encoded.len(), 54 + bmp::stride(w) * h);
            let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
            assert_eq!(decoded, img, "{w}x{h}");
        }
    }
}

#[test]
fn bmp_roundtrip_larger_than_stop_interval() {
    let img = gradient(37, 40);
    let encoded = encode_bmp(&img, Unstoppable).unwrap();
    let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, img);
}

#[test]
fn bmp_padding_is_zero() {
    let encoded = encode_bmp(&noise_pattern(5, 3), Unstoppable).unwrap();
    let stride = bmp::stride(5);
    for row in encoded[54..].chunks_exact(stride) {
        assert_eq!(&row[15..], &[0]);
    }
}

#[test]
fn bmp_nonzero_padding_is_ignored() {
    let img = noise_pattern(5, 2);
    let mut encoded = encode_bmp(&img, Unstoppable).unwrap();
    let stride = bmp::stride(5);
    encoded[54 + stride - 1] = 0xEE;
    encoded[54 + 2 * stride - 1] = 0x11;
    assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), img);
}

#[test]
fn bmp_reserved_field_not_checked() {
    let img = noise_pattern(3, 3);
    let mut encoded = encode_bmp(&img, Unstoppable).unwrap();
    encoded[6..10].copy_from_slice(&0x1234_5678u32.to_le_bytes());
    assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), img);
    let (file, _) = bmp::read_headers(&encoded).unwrap();
    assert_eq!(file.reserved, 0x1234_5678);
}

#[test]
fn bmp_all_permissiveness_levels_accept_own_output() {
    let img = gradient(9, 4);
    let encoded = encode_bmp(&img, Unstoppable).unwrap();
    for p in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        let decoded = DecodeRequest::new(&encoded)
            .with_permissiveness(p)
            .decode(Unstoppable)
            .unwrap();
        assert_eq!(decoded, img, "{p:?}");
    }
}

#[test]
fn bmp_zero_height_rejected() {
    let encoded = encode_bmp(&Image::new(3, 0, BLACK), Unstoppable).unwrap();
    assert!(matches!(
        decode_bmp(&encoded, Unstoppable),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn bmp_huge_declared_dimensions_do_not_allocate() {
    let mut encoded = encode_bmp(&noise_pattern(1, 1), Unstoppable).unwrap();
    encoded[18..22].copy_from_slice(&100_000i32.to_le_bytes());
    encoded[22..26].copy_from_slice(&100_000i32.to_le_bytes());
    assert!(matches!(
        decode_bmp(&encoded, Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
}

// ── PPM ──────────────────────────────────────────────────────────────

#[test]
fn ppm_roundtrip_noise() {
    let img = noise_pattern(16, 12);
    let encoded = encode_ppm(&img, Unstoppable).unwrap();
    assert_eq!(decode_ppm(&encoded, Unstoppable).unwrap(), img);
}

#[test]
fn ppm_rejects_other_maxval() {
    let data = b"P6\n1 1\n65535\n\x00\x01\x00\x02\x00\x03";
    assert!(matches!(
        decode_ppm(data, Unstoppable),
        Err(BitmapError::UnsupportedVariant(_))
    ));
}

#[test]
fn ppm_truncated_raster() {
    let encoded = encode_ppm(&noise_pattern(2, 2), Unstoppable).unwrap();
    assert!(matches!(
        decode_ppm(&encoded[..encoded.len() - 1], Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
}

// ── Files and dispatch ───────────────────────────────────────────────

fn convert(input: &Path, output: &Path) -> Result<(), String> {
    let load = Format::from_path(input)
        .and_then(Format::codec)
        .ok_or("input format")?
        .load;
    let save = Format::from_path(output)
        .and_then(Format::codec)
        .ok_or("output format")?
        .save;
    let image = load(input).map_err(|e| e.to_string())?;
    save(output, &image).map_err(|e| e.to_string())
}

#[test]
fn save_and_load_bmp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.bmp");
    let img = noise_pattern(11, 7);

    assert!(save_bmp(&path, &img));
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, encode_bmp(&img, Unstoppable).unwrap());
    assert_eq!(load_bmp(&path), img);
}

#[test]
fn save_bmp_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bmp");
    std::fs::write(&path, vec![0xAB; 4096]).unwrap();

    let img = noise_pattern(2, 2);
    assert!(save_bmp(&path, &img));
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 54 + 16);
}

#[test]
fn load_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_bmp(dir.path().join("missing.bmp")).is_empty());
    assert!(load_ppm(dir.path().join("missing.ppm")).is_empty());

    let garbage = dir.path().join("garbage.bmp");
    let bytes = b"BA not a bitmap at all, but long enough to hold both headers.....";
    std::fs::write(&garbage, bytes).unwrap();
    assert!(load_bmp(&garbage).is_empty());
}

#[test]
fn save_to_unwritable_path_is_false() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.bmp");
    let img = noise_pattern(1, 1);
    assert!(!save_bmp(&path, &img));
    assert!(!save_ppm(&path, &img));
}

#[test]
fn convert_bmp_to_ppm_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let bmp_in = dir.path().join("in.bmp");
    let ppm = dir.path().join("mid.ppm");
    let bmp_out = dir.path().join("out.bmp");
    let img = gradient(10, 6);

    assert!(save_bmp(&bmp_in, &img));
    convert(&bmp_in, &ppm).unwrap();
    convert(&ppm, &bmp_out).unwrap();

    assert_eq!(load_ppm(&ppm), img);
    assert_eq!(std::fs::read(&bmp_in).unwrap(), std::fs::read(&bmp_out).unwrap());
}

#[test]
fn convert_rejects_unsupported_formats() {
    let dir = tempfile::tempdir().unwrap();
    let bmp = dir.path().join("in.bmp");
    assert!(save_bmp(&bmp, &noise_pattern(1, 1)));

    assert_eq!(convert(&bmp, &dir.path().join("out.gif")), Err("output format".into()));
    assert_eq!(convert(&dir.path().join("in.png"), &bmp), Err("input format".into()));
}

// ── JPEG ─────────────────────────────────────────────────────────────

#[cfg(feature = "jpeg")]
#[test]
fn convert_bmp_to_jpeg_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let bmp_in = dir.path().join("in.bmp");
    let jpg = dir.path().join("mid.jpg");
    let bmp_out = dir.path().join("out.bmp");
    let img = gradient(33, 21);

    assert!(save_bmp(&bmp_in, &img));
    convert(&bmp_in, &jpg).unwrap();
    assert_eq!(&std::fs::read(&jpg).unwrap()[..3], &[0xFF, 0xD8, 0xFF]);
    convert(&jpg, &bmp_out).unwrap();

    let back = load_bmp(&bmp_out);
    assert_eq!((back.width(), back.height()), (33, 21));
    // Lossy: a smooth gradient stays close to the source on average.
    let total: u32 = img
        .pixels()
        .iter()
        .zip(back.pixels())
        .map(|(a, b)| u32::from(a.r.abs_diff(b.r)) + u32::from(a.g.abs_diff(b.g)))
        .sum();
    assert!(total / (33 * 21 * 2) < 10, "mean error {}", total / (33 * 21 * 2));
}

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_decode_is_detected_from_magic() {
    let img = Image::new(16, 8, Color::new(30, 160, 220));
    let encoded = encode_jpeg(&img, Unstoppable).unwrap();
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 8));
    assert_eq!(decode_jpeg(&encoded, Unstoppable).unwrap(), decoded);
}

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_file_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_jpeg(dir.path().join("missing.jpg")).is_empty());

    let truncated = dir.path().join("truncated.jpg");
    let encoded = encode_jpeg(&noise_pattern(8, 8), Unstoppable).unwrap();
    std::fs::write(&truncated, &encoded[..20]).unwrap();
    assert!(load_jpeg(&truncated).is_empty());

    assert!(!save_jpeg(dir.path().join("empty.jpg"), &Image::empty()));
}
