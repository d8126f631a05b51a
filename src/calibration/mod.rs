//! Chart geometry: calibrated column rectangles and per-planet segments.

pub mod layout;
pub mod segments;

pub use layout::{ChartLayout, Rect, Size};
pub use segments::{Segment, locate_segments};
