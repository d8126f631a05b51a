//! Calibrated chart geometry.
//!
//! The two column rectangles were measured once against the rendering tool's
//! output. Any change to that tool's layout invalidates them, so they live in
//! one named structure that can be overridden from the config file.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::Column;

/// An axis-aligned rectangle in absolute pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// True when the rectangle is non-empty and fully inside a `width` x `height` canvas.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Pixel dimensions of a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Red (Design) column as rendered by the charting tool.
pub const DEFAULT_DESIGN_RECT: Rect = Rect::new(1156, 76, 107, 870);
/// Black (Personality) column as rendered by the charting tool.
pub const DEFAULT_PERSONALITY_RECT: Rect = Rect::new(1311, 76, 107, 870);

/// Geometry of the planetary columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    /// Exact canvas size the rectangles were calibrated on. When unset, any
    /// image large enough to contain both columns is accepted.
    pub canvas: Option<Size>,
    /// Red column.
    pub design: Rect,
    /// Black column.
    pub personality: Rect,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            canvas: None,
            design: DEFAULT_DESIGN_RECT,
            personality: DEFAULT_PERSONALITY_RECT,
        }
    }
}

impl ChartLayout {
    pub fn column_rect(&self, column: Column) -> Rect {
        match column {
            Column::Design => self.design,
            Column::Personality => self.personality,
        }
    }
}
