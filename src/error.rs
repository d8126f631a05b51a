use std::path::PathBuf;

use thiserror::Error;

use crate::calibration::{Rect, Size};
use crate::chart::Column;

/// Faults in the source image, detected before any region is read.
///
/// These fail fast and are never retried: the same bytes would fail again.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read chart image {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("chart is {actual}, but the layout was calibrated for {expected}")]
    CanvasMismatch { expected: Size, actual: Size },

    #[error("{column} column {rect} is shorter than one pixel per planet ({planets})")]
    RegionTooShort {
        column: Column,
        rect: Rect,
        planets: usize,
    },

    #[error("{column} column {rect} lies outside the {width}x{height} chart")]
    RegionOutOfBounds {
        column: Column,
        rect: Rect,
        width: u32,
        height: u32,
    },
}
