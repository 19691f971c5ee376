//! Baseline/progressive JPEG via zune-jpeg (decode) and jpeg-encoder (encode).
//!
//! Neither library polls a [`Stop`] internally, so cancellation is checked
//! around the library calls and while converting pixels.

use alloc::vec::Vec;

use enough::Stop;
use jpeg_encoder::{ColorType, Encoder};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use crate::error::BitmapError;
use crate::image::{Color, Image};
use crate::limits::Limits;

/// Quality used for every encode, 1..=100.
const QUALITY: u8 = 90;

/// Decode JPEG data (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(data, options);
    decoder
        .decode_headers()
        .map_err(|e| BitmapError::Jpeg(alloc::format!("{e}")))?;
    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| BitmapError::InvalidHeader("JPEG frame header missing".into()))?;

    let pixel_count = width
        .checked_mul(height)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(pixel_count.saturating_mul(3))?;
    }

    stop.check()?;

    let raw = decoder
        .decode()
        .map_err(|e| BitmapError::Jpeg(alloc::format!("{e}")))?;

    stop.check()?;

    // Grayscale sources may come back as one byte per pixel.
    let pixels: Vec<Color> = if raw.len() == pixel_count * 3 {
        raw.chunks_exact(3)
            .map(|p| Color::new(p[0], p[1], p[2]))
            .collect()
    } else if raw.len() == pixel_count {
        raw.iter().map(|&l| Color::new(l, l, l)).collect()
    } else {
        return Err(BitmapError::BufferTooSmall {
            needed: pixel_count * 3,
            actual: raw.len(),
        });
    };

    Image::from_pixels(width, height, pixels)
}

/// Encode to JPEG (called from the top-level encode functions).
pub(crate) fn encode(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (w, h) = (image.width(), image.height());
    let too_large = || BitmapError::DimensionsTooLarge {
        width: w,
        height: h,
    };
    let width = u16::try_from(w).map_err(|_| too_large())?;
    let height = u16::try_from(h).map_err(|_| too_large())?;
    if image.is_empty() {
        return Err(BitmapError::InvalidHeader(
            "JPEG cannot hold a zero-sized image".into(),
        ));
    }

    let mut rgb = Vec::with_capacity(image.pixels().len() * 3);
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in image.row(y) {
            rgb.extend_from_slice(&[px.r, px.g, px.b]);
        }
    }

    let mut out = Vec::new();
    Encoder::new(&mut out, QUALITY)
        .encode(&rgb, width, height, ColorType::Rgb)
        .map_err(|e| BitmapError::Jpeg(alloc::format!("{e}")))?;
    Ok(out)
}
