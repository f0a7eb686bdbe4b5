#![forbid(unsafe_code)]
//! wind_fetch: wind-fetch computation over in-memory raster grids.
//!
//! Fetch is the unobstructed over-water distance wind from a given compass
//! bearing has traveled before reaching a cell. One axis-aligned column-scan
//! kernel serves every bearing: the water mask is padded, rotated so the
//! bearing maps onto "down the column", scanned, rotated back, and cropped.
//!
//! Modules:
//! - grid: owned 2-D array storage with symmetric padding
//! - rotate: nearest-neighbor rotation about the grid center
//! - kernel: columnwise water-run accumulation
//! - waterbody: the engine, configuration, and stacked results
//!
//! All inputs and outputs are grids held in memory; loading, saving, and
//! coordinate referencing belong to the caller.
pub mod error;
pub mod grid;
pub mod kernel;
pub mod rotate;
pub mod waterbody;

/// Convenient re-exports for common types. Import with `use wind_fetch::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::Grid;
    pub use crate::kernel::fetch_lengths;
    pub use crate::rotate::rotate_nearest;
    pub use crate::waterbody::{FetchConfig, FetchStack, WaterBody, WATER};
}
