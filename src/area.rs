//! Placement of a requested paint rectangle on the canvas
//!
//! The resolver decides where a source rectangle ends up and which part of it
//! is actually iterated. Requests that stick out over a canvas edge are
//! either rejected, cropped to the in-bounds part ([`BoundsPolicy::Crop`]) or
//! shifted back inside ([`BoundsPolicy::Push`]).

use crate::config::CanvasBounds;
use thiserror::Error;

/// How one axis of the rectangle origin was specified
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AxisOrigin {
    /// Coordinate of the rectangle's low edge on this axis
    TopLeft(i64),
    /// Coordinate of the rectangle's center on this axis
    Center(i64),
}

impl AxisOrigin {
    /// The effective low-edge coordinate for a rectangle of the given size
    fn effective(&self, size: u32) -> i64 {
        match *self {
            AxisOrigin::TopLeft(v) => v,
            AxisOrigin::Center(c) => c - (size / 2) as i64,
        }
    }
}

/// What to do when the requested rectangle exceeds the canvas
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BoundsPolicy {
    /// Fail the run
    #[default]
    Reject,
    /// Narrow the iterated window to the in-bounds part of the rectangle
    Crop,
    /// Translate the origin so the full rectangle becomes in-bounds
    Push,
}

/// An error which indicates that a requested area cannot be placed on the canvas
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum AreaError {
    /// The rectangle exceeds the canvas and no boundary policy was selected
    #[error(
        "a {width}x{height} area at origin {origin_x},{origin_y} reaches outside the {canvas_size}x{canvas_size} canvas (suggested origin: {suggested_x},{suggested_y})"
    )]
    OutOfBounds {
        /// Effective origin x after center translation
        origin_x: i64,
        /// Effective origin y after center translation
        origin_y: i64,
        /// Requested rectangle width
        width: u32,
        /// Requested rectangle height
        height: u32,
        /// Canvas extent per axis
        canvas_size: u32,
        /// Nearest in-bounds origin x
        suggested_x: i64,
        /// Nearest in-bounds origin y
        suggested_y: i64,
    },
    /// No translation can bring the rectangle in-bounds because it is larger
    /// than the canvas itself, which means the size limits are inconsistent
    /// with the canvas bound
    #[error(
        "invariant violation: a {width}x{height} area cannot be pushed inside a {canvas_size}x{canvas_size} canvas"
    )]
    PushUnsatisfiable {
        /// Requested rectangle width
        width: u32,
        /// Requested rectangle height
        height: u32,
        /// Canvas extent per axis
        canvas_size: u32,
    },
}

/// The resolved placement of a paint rectangle
///
/// `origin` is where the source rectangle sits on the canvas (possibly
/// negative under [`BoundsPolicy::Crop`]); `[start, stop)` is the
/// source-local window that is actually iterated. Every window coordinate
/// translated through [`ResolvedArea::to_canvas`] is guaranteed in-bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ResolvedArea {
    /// Canvas x coordinate of the source's left edge
    pub origin_x: i64,
    /// Canvas y coordinate of the source's top edge
    pub origin_y: i64,
    /// First iterated source-local x
    pub start_x: u32,
    /// First iterated source-local y
    pub start_y: u32,
    /// One past the last iterated source-local x
    pub stop_x: u32,
    /// One past the last iterated source-local y
    pub stop_y: u32,
}

impl ResolvedArea {
    /// Width of the iterated window
    pub fn width(&self) -> u32 {
        self.stop_x - self.start_x
    }

    /// Height of the iterated window
    pub fn height(&self) -> u32 {
        self.stop_y - self.start_y
    }

    /// Number of pixels in the iterated window
    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Translate source-local window coordinates to absolute canvas coordinates
    pub fn to_canvas(&self, local_x: u32, local_y: u32) -> (u16, u16) {
        let x = self.origin_x + local_x as i64;
        let y = self.origin_y + local_y as i64;
        debug_assert!(
            (0..=u16::MAX as i64).contains(&x) && (0..=u16::MAX as i64).contains(&y),
            "window coordinate {}x{} resolves outside the canvas",
            local_x,
            local_y
        );
        (x as u16, y as u16)
    }
}

/// Resolve where a `width`x`height` source rectangle is painted
///
/// Center origins are translated to their low edge first, then the rectangle
/// is checked against the canvas and the selected policy applied.
pub fn resolve(
    x: AxisOrigin,
    y: AxisOrigin,
    width: u32,
    height: u32,
    bounds: &CanvasBounds,
    policy: BoundsPolicy,
) -> Result<ResolvedArea, AreaError> {
    let canvas = bounds.canvas_size as i64;
    let origin_x = x.effective(width);
    let origin_y = y.effective(height);

    let exceeds = origin_x < 0
        || origin_y < 0
        || origin_x + width as i64 > canvas
        || origin_y + height as i64 > canvas;

    if !exceeds {
        return Ok(ResolvedArea {
            origin_x,
            origin_y,
            start_x: 0,
            start_y: 0,
            stop_x: width,
            stop_y: height,
        });
    }

    match policy {
        BoundsPolicy::Reject => Err(AreaError::OutOfBounds {
            origin_x,
            origin_y,
            width,
            height,
            canvas_size: bounds.canvas_size,
            suggested_x: origin_x.clamp(0, (canvas - width as i64).max(0)),
            suggested_y: origin_y.clamp(0, (canvas - height as i64).max(0)),
        }),
        BoundsPolicy::Crop => Ok(ResolvedArea {
            origin_x,
            origin_y,
            start_x: crop_start(origin_x, width),
            start_y: crop_start(origin_y, height),
            stop_x: crop_stop(origin_x, width, canvas),
            stop_y: crop_stop(origin_y, height, canvas),
        }),
        BoundsPolicy::Push => {
            let pushed_x = push_origin(origin_x, width, canvas);
            let pushed_y = push_origin(origin_y, height, canvas);
            // a single shift per axis can only fail when the rectangle itself
            // is larger than the canvas
            let still_exceeds = pushed_x < 0
                || pushed_y < 0
                || pushed_x + width as i64 > canvas
                || pushed_y + height as i64 > canvas;
            if still_exceeds {
                return Err(AreaError::PushUnsatisfiable {
                    width,
                    height,
                    canvas_size: bounds.canvas_size,
                });
            }
            Ok(ResolvedArea {
                origin_x: pushed_x,
                origin_y: pushed_y,
                start_x: 0,
                start_y: 0,
                stop_x: width,
                stop_y: height,
            })
        }
    }
}

/// First in-bounds source-local coordinate on one axis under the crop policy
fn crop_start(origin: i64, size: u32) -> u32 {
    (-origin).clamp(0, size as i64) as u32
}

/// First out-of-bounds source-local coordinate on one axis under the crop policy
fn crop_stop(origin: i64, size: u32, canvas: i64) -> u32 {
    let stop = (canvas - origin).clamp(0, size as i64) as u32;
    // keep the window well-formed when the rectangle lies entirely outside
    stop.max(crop_start(origin, size))
}

/// Translated low-edge coordinate on one axis under the push policy
fn push_origin(origin: i64, size: u32, canvas: i64) -> i64 {
    if origin < 0 {
        0
    } else if origin + size as i64 > canvas {
        canvas - size as i64
    } else {
        origin
    }
}
