//! Aspect-ratio preserving width/height negotiation

use crate::config::{CanvasBounds, MIN_SOURCE_SIZE};
use std::str::FromStr;
use thiserror::Error;

/// A single requested axis of a resize operation
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SizeRequest {
    /// Derive this axis from the other one, preserving the aspect ratio
    Unspecified,
    /// Set this axis to exactly the given number of pixels
    Exact(u32),
}

impl FromStr for SizeRequest {
    type Err = <u32 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(SizeRequest::Unspecified)
        } else {
            let v = u32::from_str(s)?;
            Ok(SizeRequest::Exact(v))
        }
    }
}

/// An error which indicates that a requested or derived dimension lies
/// outside the permitted source size range
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("size {size} is outside the permitted source dimension range {min}..={max}")]
pub struct InvalidSizeError {
    /// The offending dimension
    pub size: u32,
    /// Smallest permitted dimension
    pub min: u32,
    /// Largest permitted dimension
    pub max: u32,
}

/// The outcome of a size negotiation
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum SizePlan {
    /// Current dimensions stay; no resampling takes place
    Keep,
    /// Resample to the given exact dimensions
    Resample { width: u32, height: u32 },
}

/// Validate one axis value against the permitted source range
pub(super) fn check_axis(size: u32, bounds: &CanvasBounds) -> Result<u32, InvalidSizeError> {
    let max = bounds.max_source_size();
    if (MIN_SOURCE_SIZE..=max).contains(&size) {
        Ok(size)
    } else {
        Err(InvalidSizeError {
            size,
            min: MIN_SOURCE_SIZE,
            max,
        })
    }
}

/// Negotiate the new dimensions of a source of size `current`
///
/// An axis requested exactly is taken verbatim; an unspecified axis is
/// derived from the aspect ratio the source had before the call. Requesting
/// only the size an axis already has skips resampling entirely.
pub(super) fn negotiate(
    current: (u32, u32),
    width: SizeRequest,
    height: SizeRequest,
    bounds: &CanvasBounds,
) -> Result<SizePlan, InvalidSizeError> {
    let (current_width, current_height) = current;
    let aspect_ratio = current_width as f64 / current_height as f64;

    match (width, height) {
        (SizeRequest::Unspecified, SizeRequest::Unspecified) => Ok(SizePlan::Keep),
        (SizeRequest::Exact(width), SizeRequest::Exact(height)) => {
            check_axis(width, bounds)?;
            check_axis(height, bounds)?;
            if (width, height) == current {
                Ok(SizePlan::Keep)
            } else {
                Ok(SizePlan::Resample { width, height })
            }
        }
        (SizeRequest::Exact(width), SizeRequest::Unspecified) => {
            check_axis(width, bounds)?;
            if width == current_width {
                return Ok(SizePlan::Keep);
            }
            let height = check_axis((width as f64 / aspect_ratio).round() as u32, bounds)?;
            Ok(SizePlan::Resample { width, height })
        }
        (SizeRequest::Unspecified, SizeRequest::Exact(height)) => {
            check_axis(height, bounds)?;
            if height == current_height {
                return Ok(SizePlan::Keep);
            }
            let width = check_axis((height as f64 * aspect_ratio).round() as u32, bounds)?;
            Ok(SizePlan::Resample { width, height })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bounds() -> CanvasBounds {
        CanvasBounds::default()
    }

    #[test]
    fn test_both_axes_stretch_without_aspect() {
        let plan = negotiate((100, 50), SizeRequest::Exact(10), SizeRequest::Exact(80), &bounds());
        assert_eq!(plan, Ok(SizePlan::Resample { width: 10, height: 80 }));
    }

    #[test]
    fn test_width_only_derives_height() {
        // aspect 2:1, so half the width gives half the height
        let plan = negotiate((100, 50), SizeRequest::Exact(50), SizeRequest::Unspecified, &bounds());
        assert_eq!(plan, Ok(SizePlan::Resample { width: 50, height: 25 }));
    }

    #[test]
    fn test_height_only_derives_width() {
        let plan = negotiate((100, 50), SizeRequest::Unspecified, SizeRequest::Exact(100), &bounds());
        assert_eq!(plan, Ok(SizePlan::Resample { width: 200, height: 100 }));
    }

    #[test]
    fn test_derived_axis_rounds() {
        // aspect 10:7 scaled onto height 3 -> width rounds from 4.29 to 4
        let plan = negotiate((10, 7), SizeRequest::Unspecified, SizeRequest::Exact(3), &bounds());
        assert_eq!(plan, Ok(SizePlan::Resample { width: 4, height: 3 }));
    }

    #[test]
    fn test_requesting_current_size_is_a_noop() {
        let plan = negotiate((100, 50), SizeRequest::Exact(100), SizeRequest::Unspecified, &bounds());
        assert_eq!(plan, Ok(SizePlan::Keep));
        let plan = negotiate((100, 50), SizeRequest::Unspecified, SizeRequest::Exact(50), &bounds());
        assert_eq!(plan, Ok(SizePlan::Keep));
    }

    #[test]
    fn test_unspecified_axes_are_a_noop() {
        let plan = negotiate((100, 50), SizeRequest::Unspecified, SizeRequest::Unspecified, &bounds());
        assert_eq!(plan, Ok(SizePlan::Keep));
    }

    #[test]
    fn test_explicit_axis_outside_bounds_is_rejected() {
        let max = bounds().max_source_size();
        assert!(negotiate((100, 50), SizeRequest::Exact(0), SizeRequest::Unspecified, &bounds()).is_err());
        assert!(
            negotiate((100, 50), SizeRequest::Exact(max + 1), SizeRequest::Unspecified, &bounds()).is_err()
        );
    }

    #[test]
    fn test_derived_axis_outside_bounds_is_rejected() {
        // a very wide source would derive height 0 from a small width request
        let plan = negotiate((8000, 2), SizeRequest::Exact(2), SizeRequest::Unspecified, &bounds());
        assert_eq!(
            plan,
            Err(InvalidSizeError {
                size: 0,
                min: MIN_SOURCE_SIZE,
                max: bounds().max_source_size()
            })
        );
    }

    #[test]
    fn test_size_request_parsing() {
        assert_eq!("auto".parse::<SizeRequest>(), Ok(SizeRequest::Unspecified));
        assert_eq!("AUTO".parse::<SizeRequest>(), Ok(SizeRequest::Unspecified));
        assert_eq!("640".parse::<SizeRequest>(), Ok(SizeRequest::Exact(640)));
        assert!("fourty".parse::<SizeRequest>().is_err());
    }
}
