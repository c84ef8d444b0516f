//! Pixel sources that provide the color data of a paint run
//!
//! A [`Source`] is either a decoded bitmap or a flat color fill. Both expose
//! their size, can be re-sized through the aspect-preserving negotiation in
//! [`resize`] and hand out individual pixels to the dispatcher.

mod bitmap;
mod resize;

pub use bitmap::BitmapSource;
pub use resize::{InvalidSizeError, SizeRequest};

use crate::color::Rgba;
use crate::config::CanvasBounds;
use resize::SizePlan;

/// A flat single-color pixel source
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FillSource {
    width: u32,
    height: u32,
    color: Rgba,
}

impl FillSource {
    /// Create a fill of the given color and dimensions
    pub fn new(
        color: Rgba,
        width: u32,
        height: u32,
        bounds: &CanvasBounds,
    ) -> Result<Self, InvalidSizeError> {
        resize::check_axis(width, bounds)?;
        resize::check_axis(height, bounds)?;
        Ok(Self { width, height, color })
    }
}

/// The polymorphic pixel provider of a paint run
#[derive(Debug)]
pub enum Source {
    /// A decoded image, re-sampled on resize
    Bitmap(BitmapSource),
    /// A constant color
    Fill(FillSource),
}

impl Source {
    /// Current dimensions as `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        match self {
            Source::Bitmap(bitmap) => bitmap.size(),
            Source::Fill(fill) => (fill.width, fill.height),
        }
    }

    /// Negotiate new dimensions per the requested axes
    ///
    /// Axes left [`SizeRequest::Unspecified`] are derived from the current
    /// aspect ratio; see [`SizeRequest`] for the full contract. A bitmap
    /// re-samples its pixel data to the new exact dimensions, a fill only
    /// updates its stored size.
    pub fn set_size(
        &mut self,
        width: SizeRequest,
        height: SizeRequest,
        bounds: &CanvasBounds,
    ) -> Result<(), InvalidSizeError> {
        match resize::negotiate(self.size(), width, height, bounds)? {
            SizePlan::Keep => {}
            SizePlan::Resample { width, height } => match self {
                Source::Bitmap(bitmap) => bitmap.resample(width, height),
                Source::Fill(fill) => {
                    fill.width = width;
                    fill.height = height;
                }
            },
        }
        Ok(())
    }

    /// Get the color of the pixel at position (x,y)
    ///
    /// # Panics
    /// Panics when the coordinates lie outside the current dimensions. The
    /// dispatcher only ever requests coordinates inside the resolved
    /// iteration window, so an out-of-range access is an internal defect and
    /// not a recoverable condition.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let (width, height) = self.size();
        assert!(
            x < width && y < height,
            "pixel access at {}x{} outside source of size {}x{}",
            x,
            y,
            width,
            height
        );
        match self {
            Source::Bitmap(bitmap) => bitmap.pixel(x, y),
            Source::Fill(fill) => fill.color,
        }
    }
}
