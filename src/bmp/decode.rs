//! BMP decoder for uncompressed 24-bit bottom-up bitmaps.

use enough::Stop;

use super::checked_stride;
use super::header::{
    FILE_HEADER_SIZE, FileHeader, HEADERS_SIZE, INFO_HEADER_SIZE, InfoHeader, SIGNATURE,
};
use crate::error::BitmapError;
use crate::image::{BLACK, Color, Image};
use crate::limits::Limits;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Everything in `Standard`, plus: the file size field, the pixel data
    /// size field and the data offset must all agree with the width-derived
    /// row stride.
    Strict,

    /// Default behavior. Requires a 40-byte info header, one plane, 24 bits
    /// per pixel and no compression. The row stride is derived from the
    /// width; a disagreeing file size field is tolerated.
    #[default]
    Standard,

    /// Only the signature and positive dimensions are checked. The row
    /// stride is taken from the file size field, `(size_all - 54) / height`,
    /// the way legacy writers and readers of this layout compute it.
    Permissive,
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let bytes = self.read_slice(N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        if n > self.remaining() {
            return Err(BitmapError::UnexpectedEof);
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Read both headers. Fails on a short input or a bad signature; no other
/// field is checked.
pub(crate) fn read_headers(data: &[u8]) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let mut cursor = Cursor::new(data);
    read_headers_from(&mut cursor)
}

fn read_headers_from(cursor: &mut Cursor<'_>) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let file_header = FileHeader::parse(&cursor.read_fixed_bytes::<FILE_HEADER_SIZE>()?);
    let info_header = InfoHeader::parse(&cursor.read_fixed_bytes::<INFO_HEADER_SIZE>()?);
    if file_header.signature != SIGNATURE {
        return Err(BitmapError::UnrecognizedFormat);
    }
    Ok((file_header, info_header))
}

fn dimensions(info: &InfoHeader) -> Result<(usize, usize), BitmapError> {
    if info.height < 0 {
        return Err(BitmapError::UnsupportedVariant(
            "top-down BMP (negative height)".into(),
        ));
    }
    if info.width < 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "negative BMP width ({})",
            info.width
        )));
    }
    if info.width == 0 || info.height == 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "empty BMP ({}x{})",
            info.width,
            info.height
        )));
    }
    Ok((info.width as usize, info.height as usize))
}

/// Byte length of one stored row, chosen per `permissiveness`.
fn row_stride(
    file: &FileHeader,
    info: &InfoHeader,
    width: usize,
    height: usize,
    permissiveness: BmpPermissiveness,
) -> Result<usize, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge { width, height };
    let min_row = width.checked_mul(3).ok_or_else(too_large)?;

    if permissiveness == BmpPermissiveness::Permissive {
        let data_bytes = (file.size_all as usize)
            .checked_sub(HEADERS_SIZE)
            .ok_or_else(|| {
                BitmapError::InvalidHeader(alloc::format!(
                    "BMP file size field ({}) smaller than its headers",
                    file.size_all
                ))
            })?;
        let stride = data_bytes / height;
        if stride < min_row {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP file size field ({}) too small for {width}x{height} pixels",
                file.size_all
            )));
        }
        return Ok(stride);
    }

    let stride = checked_stride(width).ok_or_else(too_large)?;
    let data_bytes = stride.checked_mul(height).ok_or_else(too_large)?;
    let expected_size = data_bytes.checked_add(HEADERS_SIZE).ok_or_else(too_large)?;

    if file.size_all as usize != expected_size {
        if permissiveness == BmpPermissiveness::Strict {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP file size field ({}) doesn't match expected ({expected_size})",
                file.size_all
            )));
        }
        tracing::debug!(
            size_all = file.size_all,
            expected_size,
            "BMP file size field disagrees with width; using width-derived stride"
        );
    }

    if permissiveness == BmpPermissiveness::Strict {
        if info.pixel_byte_count as usize != data_bytes {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP image data size field ({}) doesn't match expected ({data_bytes})",
                info.pixel_byte_count
            )));
        }
        if file.indentation as usize != HEADERS_SIZE {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP data offset ({}) is not {HEADERS_SIZE}",
                file.indentation
            )));
        }
    }

    Ok(stride)
}

fn check_variant(info: &InfoHeader) -> Result<(), BitmapError> {
    if info.size_info_header != INFO_HEADER_SIZE as u32 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "BMP info header size {} (only 40-byte BITMAPINFOHEADER is supported)",
            info.size_info_header
        )));
    }
    if info.planes != 1 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP planes must be 1, got {}",
            info.planes
        )));
    }
    if info.bits_per_pixel != 24 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "{}-bit BMP (only 24-bit is supported)",
            info.bits_per_pixel
        )));
    }
    if info.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "compressed BMP (compression type {})",
            info.compression
        )));
    }
    Ok(())
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a 24-bit BMP into an [`Image`].
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let mut cursor = Cursor::new(data);
    let (file_header, info_header) = read_headers_from(&mut cursor)?;

    if permissiveness != BmpPermissiveness::Permissive {
        check_variant(&info_header)?;
    }
    let (width, height) = dimensions(&info_header)?;

    if let Some(limits) = limits {
        limits.check(width, height)?;
        let out_bytes = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(size_of::<Color>()))
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        limits.check_memory(out_bytes)?;
    }

    let stride = row_stride(&file_header, &info_header, width, height, permissiveness)?;

    // Every row must be present; checking up front avoids allocating for a
    // header that promises more data than the file holds.
    let needed = stride
        .checked_mul(height)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if cursor.remaining() < needed {
        tracing::debug!(
            needed,
            available = cursor.remaining(),
            "BMP pixel data truncated"
        );
        return Err(BitmapError::UnexpectedEof);
    }

    stop.check()?;

    let mut image = Image::try_new(width, height, BLACK)?;
    for y in (0..height).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src = cursor.read_slice(stride)?;
        for (px, bgr) in image.row_mut(y).iter_mut().zip(src.chunks_exact(3)) {
            *px = Color::new(bgr[2], bgr[1], bgr[0]);
        }
    }

    Ok(image)
}
