/// Image formats known to the converter.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// JPEG/JFIF. Encoded and decoded with the `jpeg` feature.
    Jpeg,
    /// Binary PPM (P6).
    Ppm,
    /// Uncompressed 24-bit BMP.
    Bmp,
}

impl Format {
    /// Format from a file extension given without its leading dot
    /// (`"bmp"`, `"jpeg"`). Matching is case-sensitive.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext {
            "jpg" | "jpeg" => Some(Format::Jpeg),
            "ppm" => Some(Format::Ppm),
            "bmp" => Some(Format::Bmp),
            _ => None,
        }
    }

    /// Format from the extension of `path`.
    #[cfg(feature = "std")]
    pub fn from_path(path: &std::path::Path) -> Option<Format> {
        Format::from_extension(path.extension()?.to_str()?)
    }

    /// Format from magic bytes.
    pub fn detect(data: &[u8]) -> Option<Format> {
        match data {
            [b'B', b'M', ..] => Some(Format::Bmp),
            [b'P', b'6', ..] => Some(Format::Ppm),
            [0xFF, 0xD8, 0xFF, ..] => Some(Format::Jpeg),
            _ => None,
        }
    }

    /// Load/save functions for this format, or `None` when the crate was
    /// built without its codec.
    #[cfg(feature = "std")]
    pub fn codec(self) -> Option<Codec> {
        match self {
            Format::Bmp => Some(Codec {
                load: crate::file::read_bmp_file,
                save: crate::file::write_bmp_file,
            }),
            Format::Ppm => Some(Codec {
                load: crate::file::read_ppm_file,
                save: crate::file::write_ppm_file,
            }),
            #[cfg(feature = "jpeg")]
            Format::Jpeg => Some(Codec {
                load: crate::file::read_jpeg_file,
                save: crate::file::write_jpeg_file,
            }),
            #[cfg(not(feature = "jpeg"))]
            Format::Jpeg => None,
        }
    }
}

/// A format's path-level load and save functions.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct Codec {
    pub load: fn(&std::path::Path) -> Result<crate::Image, crate::BitmapError>,
    pub save: fn(&std::path::Path, &crate::Image) -> Result<(), crate::BitmapError>,
}
