//! Owned 2-D grid storage with symmetric padding.
//!
//! This module defines [`Grid`], a row-major (rows, cols) array used for the
//! classification input, the water mask, and every fetch result. Padding and
//! unpadding are exact inverses on the interior region, which is what keeps a
//! rotated scan spatially registered with the input once the rotation is
//! undone and the border removed.
use crate::error::{Error, Result};

/// A 2-D row-major array with a fixed (rows, cols) shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T = f64> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from row-major data, checking that the shape is
    /// non-degenerate and matches the buffer length.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidShape(format!(
                "grid must have non-zero dimensions, got {rows}x{cols}"
            )));
        }
        if data.len() != rows * cols {
            return Err(Error::InvalidShape(format!(
                "data length {} does not match {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(&self.data[row * self.cols + col])
    }

    /// Row-major view of the underlying data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major view of the underlying data.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid of the given shape with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Expands the grid symmetrically by `width` cells on every side,
    /// filling the new border with `fill`.
    pub fn pad(&self, width: usize, fill: T) -> Grid<T> {
        let rows = self.rows + 2 * width;
        let cols = self.cols + 2 * width;
        let mut out = Grid::filled(rows, cols, fill);
        for r in 0..self.rows {
            let src = &self.data[r * self.cols..(r + 1) * self.cols];
            let start = (r + width) * cols + width;
            out.data[start..start + self.cols].clone_from_slice(src);
        }
        out
    }

    /// Crops `width` cells from every side, returning the interior.
    ///
    /// Inverse of [`Grid::pad`] with the same `width`: `unpad(pad(g, w, f), w)`
    /// is exactly `g`. Rejects widths that would crop everything away.
    pub fn unpad(&self, width: usize) -> Result<Grid<T>> {
        if 2 * width >= self.rows || 2 * width >= self.cols {
            return Err(Error::PaddingTooLarge {
                pad: width,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let rows = self.rows - 2 * width;
        let cols = self.cols - 2 * width;
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            let start = (r + width) * self.cols + width;
            data.extend_from_slice(&self.data[start..start + cols]);
        }
        Ok(Grid {
            rows,
            cols,
            data,
        })
    }
}
