//! Binary PPM (P6, maxval 255).
//!
//! Credits: header parsing follows the approach of zune-ppm by Caleb Etemesi
//! (MIT/Apache-2.0/Zlib).

mod decode;
mod encode;

use crate::error::BitmapError;
use crate::image::Image;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;

/// Parsed PPM header (internal).
pub(crate) struct PpmHeader {
    pub width: usize,
    pub height: usize,
    pub maxval: u32,
    pub data_offset: usize,
}

/// Decode PPM data (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let header = decode::parse_header(data)?;

    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
    }

    stop.check()?;

    if header.maxval != 255 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "PPM maxval {} (only 255 is supported)",
            header.maxval
        )));
    }

    let pixel_data = data
        .get(header.data_offset..)
        .ok_or(BitmapError::UnexpectedEof)?;

    let expected = header
        .width
        .checked_mul(header.height)
        .and_then(|wh| wh.checked_mul(3))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    if pixel_data.len() < expected {
        return Err(BitmapError::UnexpectedEof);
    }
    if let Some(limits) = limits {
        limits.check_memory(expected)?;
    }

    decode::decode_pixels(&pixel_data[..expected], &header, stop)
}

/// Encode to PPM (called from the top-level encode functions).
pub(crate) fn encode(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_ppm(image, stop)
}
