//! PPM header parser and raster decoder.

use enough::Stop;

use super::PpmHeader;
use crate::error::BitmapError;
use crate::image::{BLACK, Color, Image};

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Skip whitespace and `#` comments (which run to end of line).
fn skip_whitespace_and_comments(data: &[u8], mut pos: usize) -> usize {
    while pos < data.len() {
        if is_space(data[pos]) {
            pos += 1;
        } else if data[pos] == b'#' {
            while pos < data.len() && data[pos] != b'\n' {
                pos += 1;
            }
        } else {
            break;
        }
    }
    pos
}

/// Parse an ASCII decimal header field, returning (value, new_pos).
fn parse_uint(data: &[u8], pos: usize, field: &str) -> Result<(u32, usize), BitmapError> {
    let pos = skip_whitespace_and_comments(data, pos);
    if pos >= data.len() {
        return Err(BitmapError::UnexpectedEof);
    }
    let mut end = pos;
    let mut value: u32 = 0;
    while end < data.len() && data[end].is_ascii_digit() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(data[end] - b'0')))
            .ok_or_else(|| BitmapError::InvalidHeader(alloc::format!("PPM {field} overflows")))?;
        end += 1;
    }
    if end == pos {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "PPM {field} is not a number"
        )));
    }
    Ok((value, end))
}

/// Parse a `P6` header up to and including the single whitespace byte that
/// separates it from the raster.
pub(crate) fn parse_header(data: &[u8]) -> Result<PpmHeader, BitmapError> {
    if data.len() < 2 {
        return Err(BitmapError::UnexpectedEof);
    }
    if &data[..2] != b"P6" {
        return Err(BitmapError::UnrecognizedFormat);
    }

    let (width, pos) = parse_uint(data, 2, "width")?;
    let (height, pos) = parse_uint(data, pos, "height")?;
    let (maxval, pos) = parse_uint(data, pos, "maxval")?;

    match data.get(pos) {
        Some(&b) if is_space(b) => {}
        Some(_) => {
            return Err(BitmapError::InvalidHeader(
                "PPM header not followed by whitespace".into(),
            ));
        }
        None => return Err(BitmapError::UnexpectedEof),
    }

    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "empty PPM ({width}x{height})"
        )));
    }
    if maxval == 0 || maxval > 65535 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "PPM maxval {maxval} out of range"
        )));
    }

    Ok(PpmHeader {
        width: width as usize,
        height: height as usize,
        maxval,
        data_offset: pos + 1,
    })
}

/// Copy an RGB raster of exactly `width * height * 3` bytes into an image.
pub(crate) fn decode_pixels(
    raster: &[u8],
    header: &PpmHeader,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let mut image = Image::try_new(header.width, header.height, BLACK)?;
    for (y, src) in raster.chunks_exact(header.width * 3).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (px, rgb) in image.row_mut(y).iter_mut().zip(src.chunks_exact(3)) {
            *px = Color::new(rgb[0], rgb[1], rgb[2]);
        }
    }
    Ok(image)
}
