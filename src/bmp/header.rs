//! BITMAPFILEHEADER / BITMAPINFOHEADER byte layout.
//!
//! Fields are serialized one by one at fixed offsets, little-endian, with no
//! padding between them.

use alloc::vec::Vec;

/// Size of the file header in bytes.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER in bytes.
pub const INFO_HEADER_SIZE: usize = 40;
/// Offset of the pixel data: both headers, no colour table.
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

pub(crate) const SIGNATURE: [u8; 2] = *b"BM";
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;
const COMPRESSION_NONE: u32 = 0;
/// 300 DPI in pixels per metre.
const RESOLUTION: i32 = 11811;
const COLORS_SIGNIFICANT: i32 = 0x100_0000;

/// The 14-byte BMP file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    /// Total file size in bytes.
    pub size_all: u32,
    pub reserved: u32,
    /// Offset from the start of the file to the first pixel byte.
    pub indentation: u32,
}

impl FileHeader {
    /// Header for a file whose pixel data occupies `pixel_byte_count` bytes.
    pub(crate) fn new(pixel_byte_count: u32) -> Option<Self> {
        Some(Self {
            signature: SIGNATURE,
            size_all: pixel_byte_count.checked_add(HEADERS_SIZE as u32)?,
            reserved: 0,
            indentation: HEADERS_SIZE as u32,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.size_all.to_le_bytes());
        out.extend_from_slice(&self.reserved.to_le_bytes());
        out.extend_from_slice(&self.indentation.to_le_bytes());
    }

    pub(crate) fn parse(b: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            signature: [b[0], b[1]],
            size_all: u32_at(b, 2),
            reserved: u32_at(b, 6),
            indentation: u32_at(b, 10),
        }
    }
}

/// The 40-byte BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub size_info_header: u32,
    pub width: i32,
    /// Positive: rows stored bottom-up.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub pixel_byte_count: u32,
    pub horizontal_resolution: i32,
    pub vertical_resolution: i32,
    pub colors_used: i32,
    pub colors_significant: i32,
}

impl InfoHeader {
    /// Header for an uncompressed 24-bit bottom-up image.
    pub(crate) fn new(width: i32, height: i32, pixel_byte_count: u32) -> Self {
        Self {
            size_info_header: INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: PLANES,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
            pixel_byte_count,
            horizontal_resolution: RESOLUTION,
            vertical_resolution: RESOLUTION,
            colors_used: 0,
            colors_significant: COLORS_SIGNIFICANT,
        }
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.size_info_header.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.pixel_byte_count.to_le_bytes());
        out.extend_from_slice(&self.horizontal_resolution.to_le_bytes());
        out.extend_from_slice(&self.vertical_resolution.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_significant.to_le_bytes());
    }

    pub(crate) fn parse(b: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            size_info_header: u32_at(b, 0),
            width: u32_at(b, 4) as i32,
            height: u32_at(b, 8) as i32,
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            pixel_byte_count: u32_at(b, 20),
            horizontal_resolution: u32_at(b, 24) as i32,
            vertical_resolution: u32_at(b, 28) as i32,
            colors_used: u32_at(b, 32) as i32,
            colors_significant: u32_at(b, 36) as i32,
        }
    }
}

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_sizes() {
        let mut out = Vec::new();
        FileHeader::new(0).unwrap().write_to(&mut out);
        assert_eq!(out.len(), FILE_HEADER_SIZE);
        InfoHeader::new(1, 1, 4).write_to(&mut out);
        assert_eq!(out.len(), HEADERS_SIZE);
    }

    #[test]
    fn field_offsets() {
        let mut out = Vec::new();
        FileHeader::new(16).unwrap().write_to(&mut out);
        InfoHeader::new(5, 1, 16).write_to(&mut out);

        assert_eq!(&out[0..2], b"BM");
        assert_eq!(u32_at(&out, 2), 70);
        assert_eq!(u32_at(&out, 6), 0);
        assert_eq!(u32_at(&out, 10), 54);
        assert_eq!(u32_at(&out, 14), 40);
        assert_eq!(u32_at(&out, 18), 5);
        assert_eq!(u32_at(&out, 22), 1);
        assert_eq!(u16_at(&out, 26), 1);
        assert_eq!(u16_at(&out, 28), 24);
        assert_eq!(u32_at(&out, 30), 0);
        assert_eq!(u32_at(&out, 34), 16);
        assert_eq!(u32_at(&out, 38), 11811);
        assert_eq!(u32_at(&out, 42), 11811);
        assert_eq!(u32_at(&out, 46), 0);
        assert_eq!(u32_at(&out, 50), 0x100_0000);
    }

    #[test]
    fn parse_reads_back_written_fields() {
        let file = FileHeader {
            reserved: 0xDEAD_BEEF,
            ..FileHeader::new(12).unwrap()
        };
        let info = InfoHeader::new(4, 1, 12);
        let mut out = Vec::new();
        file.write_to(&mut out);
        info.write_to(&mut out);

        let file_bytes: [u8; FILE_HEADER_SIZE] = out[..FILE_HEADER_SIZE].try_into().unwrap();
        let info_bytes: [u8; INFO_HEADER_SIZE] = out[FILE_HEADER_SIZE..].try_into().unwrap();
        assert_eq!(FileHeader::parse(&file_bytes), file);
        assert_eq!(InfoHeader::parse(&info_bytes), info);
    }

    #[test]
    fn file_header_size_overflow() {
        assert!(FileHeader::new(u32::MAX).is_none());
    }
}
