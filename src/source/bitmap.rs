//! A pixel source backed by a decoded image

use crate::color::Rgba;
use crate::config::CanvasBounds;
use crate::source::resize::{self, InvalidSizeError};
use image::imageops::FilterType;
use image::RgbaImage;

/// A pixel source that owns a decoded image
///
/// The backing buffer is replaced wholesale on every re-sample; the previous
/// buffer is dropped together with its binding.
pub struct BitmapSource {
    image: RgbaImage,
}

impl BitmapSource {
    /// Wrap a decoded image, validating its dimensions against the canvas limits
    pub fn new(image: RgbaImage, bounds: &CanvasBounds) -> Result<Self, InvalidSizeError> {
        resize::check_axis(image.width(), bounds)?;
        resize::check_axis(image.height(), bounds)?;
        Ok(Self { image })
    }

    pub(super) fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Re-sample the pixel data to the new exact dimensions
    pub(super) fn resample(&mut self, width: u32, height: u32) {
        tracing::debug!(
            "Resampling image from {:?} to {}x{}",
            self.image.dimensions(),
            width,
            height
        );
        self.image = image::imageops::resize(&self.image, width, height, FilterType::Lanczos3);
    }

    pub(super) fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.image.get_pixel(x, y).0.into()
    }
}

impl std::fmt::Debug for BitmapSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitmapSource")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}
