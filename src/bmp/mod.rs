//! Uncompressed 24-bit BMP codec.
//!
//! Files are a 14-byte file header, a 40-byte BITMAPINFOHEADER and then the
//! pixel rows, visual bottom row first, each pixel stored as B, G, R and each
//! row zero-padded to a multiple of four bytes (the [stride]).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.

mod decode;
mod encode;
mod header;

pub use decode::BmpPermissiveness;
pub use header::{FILE_HEADER_SIZE, FileHeader, HEADERS_SIZE, INFO_HEADER_SIZE, InfoHeader};

use crate::error::BitmapError;
use crate::image::Image;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;

/// Bytes occupied by one stored row of `width` pixels, padding included.
///
/// Always a multiple of 4 and at least `3 * width`.
///
/// # Panics
///
/// Overflows (and panics in debug builds) for widths above `usize::MAX / 3`;
/// see [`checked_stride`].
pub const fn stride(width: usize) -> usize {
    4 * ((width * 3 + 3) / 4)
}

/// [`stride`] returning `None` on overflow.
pub fn checked_stride(width: usize) -> Option<usize> {
    width.checked_mul(3)?.checked_add(3).map(|r| r & !3)
}

/// Parse the file and info headers without decoding pixels.
///
/// Only the length and the `BM` signature are validated.
pub fn read_headers(data: &[u8]) -> Result<(FileHeader, InfoHeader), BitmapError> {
    decode::read_headers(data)
}

/// Decode BMP data.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    decode::decode_bmp(data, limits, permissiveness, stop)
}

/// Encode to BMP.
pub(crate) fn encode(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(image, stop)
}

/// Encode to BMP, streaming headers and rows into `writer`.
#[cfg(feature = "std")]
pub(crate) fn write<W: std::io::Write>(
    mut writer: W,
    image: &Image,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    encode::encode_with(image, stop, |bytes| Ok(writer.write_all(bytes)?))?;
    writer.flush()?;
    Ok(())
}
