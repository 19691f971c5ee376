use alloc::vec;
use alloc::vec::Vec;

use crate::error::BitmapError;

/// One 8-bit RGB pixel.
pub type Color = rgb::RGB8;

/// Opaque black, the fill colour of freshly decoded images.
pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

/// Owned row-major RGB pixel grid. Row 0 is the visual top.
///
/// A 0×0 image is the failure sentinel returned by the path-level loaders
/// such as [`crate::load_bmp`]; see [`Image::is_empty`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<Color>,
    width: usize,
    height: usize,
}

impl Image {
    /// Create a `width × height` image filled with `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`. Use [`Image::try_new`]
    /// for dimensions that come from untrusted input.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        match Self::try_new(width, height, fill) {
            Ok(img) => img,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a `width × height` image, rejecting overflowing dimensions.
    pub fn try_new(width: usize, height: usize, fill: Color) -> Result<Self, BitmapError> {
        let len = width
            .checked_mul(height)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            pixels: vec![fill; len],
            width,
            height,
        })
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Color>,
    ) -> Result<Self, BitmapError> {
        let needed = width
            .checked_mul(height)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        if pixels.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// The 0×0 failure sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixels of row `y`, exactly `width` long.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[Color] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Mutable pixels of row `y`, exactly `width` long.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [Color] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.row(y)[x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.row_mut(y)[x] = color;
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    /// Zero-copy view as an [`imgref::ImgRef`]. `None` for an empty image.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Option<imgref::ImgRef<'_, Color>> {
        if self.is_empty() {
            return None;
        }
        Some(imgref::ImgRef::new(&self.pixels[..], self.width, self.height))
    }
}
