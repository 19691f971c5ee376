//! # imgconv
//!
//! Uncompressed 24-bit BMP and binary PPM codecs, JPEG through zune-jpeg and
//! jpeg-encoder, an extension-based format dispatcher, and the `imgconv`
//! converter built on them.
//!
//! ## Supported Formats
//!
//! ### BMP
//! - Decode and encode of uncompressed, bottom-up, 24-bit BMP with a 40-byte
//!   BITMAPINFOHEADER and no palette. Validation strictness is selectable with
//!   [`BmpPermissiveness`].
//!
//! ### PPM
//! - **P6** binary RGB, maxval 255.
//!
//! ### JPEG (`jpeg` feature)
//! - Decode of baseline and progressive JPEG to RGB (grayscale is expanded).
//! - Encode at a fixed quality of 90, dimensions up to 65535.
//!
//! ## Non-Goals
//!
//! - Compressed, paletted, 16/32-bit or top-down BMP
//! - ASCII or 16-bit PNM
//!
//! ## Usage
//!
//! ```no_run
//! use imgconv::{Color, Image, Unstoppable};
//!
//! let mut image = Image::new(2, 2, Color::new(255, 0, 0));
//! image.set_pixel(1, 1, Color::new(0, 0, 255));
//!
//! let bmp = imgconv::encode_bmp(&image, Unstoppable)?;
//! assert_eq!(&bmp[..2], b"BM");
//!
//! let decoded = imgconv::decode(&bmp, Unstoppable)?;
//! assert_eq!(decoded, image);
//! # Ok::<(), imgconv::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod format;
mod image;
mod limits;

pub mod bmp;
mod ppm;
#[cfg(feature = "jpeg")]
mod jpeg;

mod decode;
#[cfg(feature = "std")]
mod file;

// Re-exports
pub use bmp::BmpPermissiveness;
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
#[cfg(feature = "std")]
pub use file::{
    load_bmp, load_ppm, read_bmp_file, read_ppm_file, save_bmp, save_ppm, write_bmp_file,
    write_ppm_file,
};
#[cfg(feature = "std")]
pub use format::Codec;
#[cfg(feature = "jpeg")]
pub use file::{load_jpeg, read_jpeg_file, save_jpeg, write_jpeg_file};
pub use format::Format;
pub use image::{BLACK, Color, Image};
pub use limits::Limits;

use alloc::vec::Vec;

/// Decode BMP, PPM or JPEG data, detected from magic bytes.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode BMP data with default validation.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).with_format(Format::Bmp).decode(stop)
}

/// Decode binary PPM data.
pub fn decode_ppm(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).with_format(Format::Ppm).decode(stop)
}

/// Encode as 24-bit BMP.
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(image, &stop)
}

/// Encode as 24-bit BMP into `writer`, one row at a time.
#[cfg(feature = "std")]
pub fn write_bmp<W: std::io::Write>(
    writer: W,
    image: &Image,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    bmp::write(writer, image, &stop)
}

/// Encode as binary PPM (P6).
pub fn encode_ppm(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    ppm::encode(image, &stop)
}

/// Decode JPEG data to RGB.
#[cfg(feature = "jpeg")]
pub fn decode_jpeg(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).with_format(Format::Jpeg).decode(stop)
}

/// Encode as JPEG at quality 90.
#[cfg(feature = "jpeg")]
pub fn encode_jpeg(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    jpeg::encode(image, &stop)
}
