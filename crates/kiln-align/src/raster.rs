use image::{DynamicImage, RgbaImage};

/// A decoded RGBA raster owned by a single alignment computation.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode any supported format, expanding to a full alpha channel.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    pub fn from_encoded(bytes: &[u8]) -> Result<Self, image::ImageError> {
        Ok(Self::from_dynamic(image::load_from_memory(bytes)?))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[3]
    }

    /// Horizontal extent `(min_x, max_x)` of pixels whose alpha exceeds
    /// `threshold` on row `y`, or `None` if the row has none.
    pub fn opaque_extent(&self, y: u32, threshold: u8) -> Option<(u32, u32)> {
        if y >= self.height() {
            return None;
        }
        let mut extent: Option<(u32, u32)> = None;
        for x in 0..self.width() {
            if self.alpha(x, y) > threshold {
                extent = Some(match extent {
                    Some((min, _)) => (min, x),
                    None => (x, x),
                });
            }
        }
        extent
    }

    pub fn row_has_opaque(&self, y: u32, threshold: u8) -> bool {
        y < self.height() && (0..self.width()).any(|x| self.alpha(x, y) > threshold)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}
