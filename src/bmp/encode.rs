//! BMP encoder: uncompressed 24-bit, bottom-up.

use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use super::checked_stride;
use super::header::{FileHeader, HEADERS_SIZE, InfoHeader};
use crate::error::BitmapError;
use crate::image::Image;

/// Headers and row stride for `image`, with every size checked against the
/// header field widths.
fn plan(image: &Image) -> Result<(usize, FileHeader, InfoHeader), BitmapError> {
    let (width, height) = (image.width(), image.height());
    let too_large = || BitmapError::DimensionsTooLarge { width, height };

    let stride = checked_stride(width).ok_or_else(too_large)?;
    let w = i32::try_from(width).map_err(|_| too_large())?;
    let h = i32::try_from(height).map_err(|_| too_large())?;
    let pixel_byte_count = stride
        .checked_mul(height)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    let file_header = FileHeader::new(pixel_byte_count).ok_or_else(too_large)?;

    Ok((stride, file_header, InfoHeader::new(w, h, pixel_byte_count)))
}

/// Serialize `image` piecewise into `sink`: headers first, then one padded
/// row at a time, visual bottom row first.
pub(crate) fn encode_with<F>(
    image: &Image,
    stop: &dyn Stop,
    mut sink: F,
) -> Result<(), BitmapError>
where
    F: FnMut(&[u8]) -> Result<(), BitmapError>,
{
    let (stride, file_header, info_header) = plan(image)?;

    let mut headers = Vec::with_capacity(HEADERS_SIZE);
    file_header.write_to(&mut headers);
    info_header.write_to(&mut headers);
    sink(&headers)?;

    // Padding bytes past width*3 are never touched and stay zero.
    let mut row_buf = vec![0u8; stride];
    for y in (0..image.height()).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (px, out) in image.row(y).iter().zip(row_buf.chunks_exact_mut(3)) {
            out[0] = px.b;
            out[1] = px.g;
            out[2] = px.r;
        }
        sink(&row_buf)?;
    }

    Ok(())
}

/// Encode `image` to an in-memory BMP file.
pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (_, file_header, _) = plan(image)?;
    let mut out = Vec::with_capacity(file_header.size_all as usize);
    encode_with(image, stop, |bytes| {
        out.extend_from_slice(bytes);
        Ok(())
    })?;
    Ok(out)
}
