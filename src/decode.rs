use enough::Stop;

use crate::bmp::BmpPermissiveness;
use crate::error::BitmapError;
use crate::format::Format;
use crate::image::Image;
use crate::limits::Limits;

/// Decode builder: format detection, limits and BMP strictness.
///
/// ```no_run
/// use imgconv::{BmpPermissiveness, DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // BMP, PPM or JPEG bytes
/// let limits = Limits { max_pixels: Some(64 << 20), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Strict)
///     .decode(Unstoppable)?;
/// # Ok::<(), imgconv::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
    format: Option<Format>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
            format: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// How strictly BMP headers are validated. Ignored for PPM.
    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Skip magic-byte detection and decode as `format`.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Image, BitmapError> {
        let format = match self.format {
            Some(f) => f,
            None => Format::detect(self.data).ok_or(BitmapError::UnrecognizedFormat)?,
        };
        tracing::debug!(?format, len = self.data.len(), "decoding");
        match format {
            Format::Bmp => crate::bmp::decode(self.data, self.limits, self.permissiveness, &stop),
            Format::Ppm => crate::ppm::decode(self.data, self.limits, &stop),
            #[cfg(feature = "jpeg")]
            Format::Jpeg => crate::jpeg::decode(self.data, self.limits, &stop),
            #[cfg(not(feature = "jpeg"))]
            Format::Jpeg => Err(BitmapError::UnsupportedVariant(
                "built without the `jpeg` feature".into(),
            )),
        }
    }
}
