//! Domain model of a rendered chart: planets, columns, readings, and the raster.

pub mod gate_line;
pub mod planet;
pub mod raster;

pub use gate_line::{GateLine, ResolvedValue};
pub use planet::{Column, PLANET_COUNT, PLANET_ORDER, Planet};
pub use raster::ChartImage;
