//! Region locator: maps columns to rectangles and slices them per planet.
//!
//! Pure coordinate arithmetic. The caller is expected to have validated the
//! image against the layout already (see `ChartImage::load`).

use super::layout::{ChartLayout, Rect};
use crate::chart::{Column, PLANET_COUNT, PLANET_ORDER, Planet};

/// One planet's slice of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub column: Column,
    pub planet: Planet,
    pub rect: Rect,
}

/// Splits `rect` into 13 horizontal bands, top to bottom.
///
/// Every band is `height / 13` tall; the last one also takes the remainder so
/// the bands tile the rectangle exactly.
pub fn split_rows(rect: Rect) -> [Rect; PLANET_COUNT] {
    let band = rect.height / PLANET_COUNT as u32;

    std::array::from_fn(|i| {
        let top = rect.y + i as u32 * band;
        let height = if i == PLANET_COUNT - 1 { rect.bottom() - top } else { band };
        Rect::new(rect.x, top, rect.width, height)
    })
}

/// Returns the 13 segments of one column, in planet order.
pub fn column_segments(layout: &ChartLayout, column: Column) -> Vec<Segment> {
    let rows = split_rows(layout.column_rect(column));
    PLANET_ORDER
        .iter()
        .map(|&planet| Segment {
            column,
            planet,
            rect: rows[planet.index()],
        })
        .collect()
}

/// Returns all 26 segments: the Design column first, then Personality.
pub fn locate_segments(layout: &ChartLayout) -> Vec<Segment> {
    Column::ALL
        .into_iter()
        .flat_map(|column| column_segments(layout, column))
        .collect()
}
