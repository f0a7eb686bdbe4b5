//! Nearest-neighbor grid rotation about the array center.
//!
//! Rotation is shape-preserving: the output has the same (rows, cols) as the
//! input, and any output cell whose source falls outside the input is filled
//! with NaN. Resampling is strictly nearest-neighbor so the -1/NaN water-mask
//! encoding is never blended into fractional values.
use glam::DVec2;

use crate::grid::Grid;

/// Rotates `grid` by `angle_deg` degrees about its center.
///
/// Positive angles rotate the content counterclockwise in array index
/// space, so a quarter turn sends the top row to the left edge, as
/// `numpy.rot90` does. Each output cell is mapped back through the inverse
/// rotation and sampled from the nearest input cell. Angles compose as
/// expected: rotating by `a` and then by `360 - a` restores every interior
/// cell that stayed in frame for both rotations.
pub fn rotate_nearest(grid: &Grid<f64>, angle_deg: f64) -> Grid<f64> {
    let (rows, cols) = grid.shape();
    let center = DVec2::new((cols as f64 - 1.0) / 2.0, (rows as f64 - 1.0) / 2.0);
    let inverse = DVec2::from_angle(angle_deg.to_radians());

    let input = grid.as_slice();
    let mut out = Grid::filled(rows, cols, f64::NAN);
    let output = out.as_mut_slice();
    for row in 0..rows {
        for col in 0..cols {
            let offset = DVec2::new(col as f64, row as f64) - center;
            let src = inverse.rotate(offset) + center;
            let src_col = src.x.round();
            let src_row = src.y.round();
            if src_row >= 0.0
                && src_col >= 0.0
                && src_row < rows as f64
                && src_col < cols as f64
            {
                output[row * cols + col] = input[src_row as usize * cols + src_col as usize];
            }
        }
    }
    out
}
