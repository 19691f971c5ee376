//! PPM encoder: P6, maxval 255.

use crate::error::BitmapError;
use crate::image::Image;
use alloc::format;
use alloc::vec::Vec;
use enough::Stop;

/// Encode an image as binary PPM, top row first.
pub(crate) fn encode_ppm(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (image.width(), image.height());
    let raster = width
        .checked_mul(height)
        .and_then(|wh| wh.checked_mul(3))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    let header = format!("P6\n{width} {height}\n255\n");
    let mut out = Vec::with_capacity(header.len() + raster);
    out.extend_from_slice(header.as_bytes());

    for y in 0..height {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in image.row(y) {
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
    }

    Ok(out)
}
