//! Path-level load and save.
//!
//! The `read_*`/`write_*` functions report failures as [`BitmapError`]. The
//! `load_*`/`save_*` functions collapse them into the converter's boundary
//! signals: an empty [`Image`] or `false`, with the cause logged.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use enough::Unstoppable;

use crate::bmp::BmpPermissiveness;
use crate::error::BitmapError;
use crate::image::Image;

/// Read and decode a BMP file.
pub fn read_bmp_file(path: &Path) -> Result<Image, BitmapError> {
    let data = fs::read(path)?;
    crate::bmp::decode(&data, None, BmpPermissiveness::default(), &Unstoppable)
}

/// Encode `image` as BMP, replacing any existing file at `path`.
pub fn write_bmp_file(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let file = File::create(path)?;
    crate::bmp::write(BufWriter::new(file), image, &Unstoppable)
}

/// Read and decode a PPM file.
pub fn read_ppm_file(path: &Path) -> Result<Image, BitmapError> {
    let data = fs::read(path)?;
    crate::ppm::decode(&data, None, &Unstoppable)
}

/// Encode `image` as PPM, replacing any existing file at `path`.
pub fn write_ppm_file(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let encoded = crate::ppm::encode(image, &Unstoppable)?;
    fs::write(path, encoded)?;
    Ok(())
}

/// Read and decode a JPEG file.
#[cfg(feature = "jpeg")]
pub fn read_jpeg_file(path: &Path) -> Result<Image, BitmapError> {
    let data = fs::read(path)?;
    crate::jpeg::decode(&data, None, &Unstoppable)
}

/// Encode `image` as JPEG, replacing any existing file at `path`.
#[cfg(feature = "jpeg")]
pub fn write_jpeg_file(path: &Path, image: &Image) -> Result<(), BitmapError> {
    let encoded = crate::jpeg::encode(image, &Unstoppable)?;
    fs::write(path, encoded)?;
    Ok(())
}

fn sentinel_on_error(path: &Path, result: Result<Image, BitmapError>) -> Image {
    result.unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "loading failed");
        Image::empty()
    })
}

fn flag_on_error(path: &Path, result: Result<(), BitmapError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "saving failed");
            false
        }
    }
}

/// Load a BMP file; returns an empty image on any failure.
pub fn load_bmp(path: impl AsRef<Path>) -> Image {
    let path = path.as_ref();
    sentinel_on_error(path, read_bmp_file(path))
}

/// Save `image` as BMP; returns `false` on any failure.
///
/// The destination may be left partially written when this fails.
pub fn save_bmp(path: impl AsRef<Path>, image: &Image) -> bool {
    let path = path.as_ref();
    flag_on_error(path, write_bmp_file(path, image))
}

/// Load a PPM file; returns an empty image on any failure.
pub fn load_ppm(path: impl AsRef<Path>) -> Image {
    let path = path.as_ref();
    sentinel_on_error(path, read_ppm_file(path))
}

/// Save `image` as PPM; returns `false` on any failure.
pub fn save_ppm(path: impl AsRef<Path>, image: &Image) -> bool {
    let path = path.as_ref();
    flag_on_error(path, write_ppm_file(path, image))
}

/// Load a JPEG file; returns an empty image on any failure.
#[cfg(feature = "jpeg")]
pub fn load_jpeg(path: impl AsRef<Path>) -> Image {
    let path = path.as_ref();
    sentinel_on_error(path, read_jpeg_file(path))
}

/// Save `image` as JPEG; returns `false` on any failure.
#[cfg(feature = "jpeg")]
pub fn save_jpeg(path: impl AsRef<Path>, image: &Image) -> bool {
    let path = path.as_ref();
    flag_on_error(path, write_jpeg_file(path, image))
}
