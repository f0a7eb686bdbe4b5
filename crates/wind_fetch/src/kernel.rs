//! Axis-aligned fetch accumulation kernel.
//!
//! Computes, independently for every column, the running upwind water-run
//! length moving down the column. "Down the column" is the one scan
//! direction the kernel understands; all compass bearings are served by
//! rotating the grid before this pass and rotating the result back after.
use crate::grid::Grid;

/// Accumulates water-run lengths down every column of a WATER(-1)/NaN grid.
///
/// A water cell receives the count of consecutive water cells from the most
/// recent non-water boundary (or the top of the column) down to and including
/// itself, times `resolution`. A non-water cell resets the run and carries no
/// value. Counts are exact integers scaled once at output, never smoothed.
pub fn fetch_lengths(mask: &Grid<f64>, resolution: f64) -> Grid<f64> {
    let (rows, cols) = mask.shape();
    let input = mask.as_slice();
    let mut out = Grid::filled(rows, cols, f64::NAN);
    let output = out.as_mut_slice();
    for col in 0..cols {
        let mut run = 0u64;
        for row in 0..rows {
            let idx = row * cols + col;
            if input[idx].is_nan() {
                run = 0;
            } else {
                run += 1;
                output[idx] = run as f64 * resolution;
            }
        }
    }
    out
}
