//! The wind-fetch engine: water-body preparation and multi-direction scans.
//!
//! [`WaterBody`] converts a land/water classification into the -1/NaN water
//! mask, precomputes the rotation padding margin, and computes fetch for any
//! set of compass bearings described by a [`FetchConfig`]. Results are
//! stacked per requested direction into a [`FetchStack`].
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::kernel::fetch_lengths;
use crate::rotate::rotate_nearest;

/// Cell value marking water in the mask; doubles as the accumulation seed.
pub const WATER: f64 = -1.0;

/// Configuration for a multi-direction fetch computation.
///
/// Directions are compass bearings in degrees, computed in request order.
/// Optionally each direction is expanded into a cluster of
/// `minor_directions` bearings spaced `minor_interval` degrees apart and
/// centered on the requested bearing; cluster members are averaged into a
/// single output band. The minor pair must be supplied together.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchConfig {
    /// Requested bearings in degrees, one output band each.
    pub directions: Vec<f64>,
    /// Number of bearings per minor cluster.
    pub minor_directions: Option<usize>,
    /// Angular spacing between minor-cluster bearings, in degrees.
    pub minor_interval: Option<f64>,
}

impl FetchConfig {
    /// Creates a configuration for the given bearings, without minor clusters.
    pub fn new(directions: impl Into<Vec<f64>>) -> Self {
        Self {
            directions: directions.into(),
            minor_directions: None,
            minor_interval: None,
        }
    }

    /// Creates a configuration for a single bearing.
    pub fn single(direction: f64) -> Self {
        Self::new(vec![direction])
    }

    /// Sets the number of bearings per minor cluster.
    pub fn with_minor_directions(mut self, minor_directions: usize) -> Self {
        self.minor_directions = Some(minor_directions);
        self
    }

    /// Sets the angular spacing between minor-cluster bearings.
    pub fn with_minor_interval(mut self, minor_interval: f64) -> Self {
        self.minor_interval = Some(minor_interval);
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.directions.is_empty() {
            return Err(Error::InvalidParameter(
                "directions must not be empty".into(),
            ));
        }
        match (self.minor_directions, self.minor_interval) {
            (None, None) => {}
            (Some(0), _) => {
                return Err(Error::InvalidParameter(
                    "minor_directions must be > 0".into(),
                ));
            }
            (Some(_), Some(interval)) => {
                if !interval.is_finite() {
                    return Err(Error::InvalidParameter(
                        "minor_interval must be finite".into(),
                    ));
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::InvalidParameter(
                    "minor_directions and minor_interval must be supplied together".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Stack of per-direction fetch arrays, band order matching the request.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchStack {
    directions: Vec<f64>,
    bands: Vec<Grid<f64>>,
}

impl FetchStack {
    /// Requested bearings, in band order.
    pub fn directions(&self) -> &[f64] {
        &self.directions
    }

    /// All bands, in band order.
    pub fn bands(&self) -> &[Grid<f64>] {
        &self.bands
    }

    /// Fetch array for the band at `index`.
    pub fn band(&self, index: usize) -> Option<&Grid<f64>> {
        self.bands.get(index)
    }

    /// Logical shape as `(rows, cols, bands)`, or all zeros with no bands.
    pub fn shape(&self) -> (usize, usize, usize) {
        match self.bands.first() {
            Some(band) => {
                let (rows, cols) = band.shape();
                (rows, cols, self.bands.len())
            }
            None => (0, 0, 0),
        }
    }
}

/// A water body prepared for directional fetch scans.
///
/// Holds the immutable -1/NaN water mask, the grid resolution, and the
/// padding margin that makes rotation by any angle safe to invert and crop.
#[derive(Debug, Clone)]
pub struct WaterBody {
    mask: Grid<f64>,
    resolution: f64,
    pad_cells: usize,
}

impl WaterBody {
    /// Prepares a water body from a classification grid.
    ///
    /// Cells whose classification equals `water_id` become water; everything
    /// else carries no value. `resolution` is the linear distance covered by
    /// one cell and must be positive.
    pub fn new<T: PartialEq>(
        classification: &Grid<T>,
        water_id: &T,
        resolution: f64,
    ) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "resolution must be > 0, got {resolution}"
            )));
        }
        let (rows, cols) = classification.shape();
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidShape(format!(
                "classification grid must have non-zero dimensions, got {rows}x{cols}"
            )));
        }

        let data = classification
            .as_slice()
            .iter()
            .map(|cell| if cell == water_id { WATER } else { f64::NAN })
            .collect();
        let mask = Grid::from_vec(rows, cols, data)?;

        // Margin large enough that rotating the padded grid by any angle and
        // rotating back loses no original cell when the same margin is
        // cropped off again.
        let xlen = resolution * cols as f64;
        let ylen = resolution * rows as f64;
        let pad_cells = (xlen.hypot(ylen) - xlen.min(ylen)).ceil() as usize;

        Ok(Self {
            mask,
            resolution,
            pad_cells,
        })
    }

    /// The -1/NaN water mask derived from the classification.
    pub fn water_mask(&self) -> &Grid<f64> {
        &self.mask
    }

    /// Linear distance covered by one cell.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Symmetric padding margin applied around every rotation, in cells.
    pub fn padding_cells(&self) -> usize {
        self.pad_cells
    }

    /// Computes the fetch array for one bearing, aligned with the original grid.
    ///
    /// Pads the mask, rotates it so the bearing maps onto the kernel's
    /// down-the-column scan, accumulates run lengths, rotates the result
    /// back by `360 - angle`, and crops the padding off again.
    pub fn fetch_single_direction(&self, angle: f64) -> Result<Grid<f64>> {
        let padded = self.mask.pad(self.pad_cells, f64::NAN);
        let rotated = rotate_nearest(&padded, angle);
        let lengths = fetch_lengths(&rotated, self.resolution);
        let aligned = rotate_nearest(&lengths, 360.0 - angle);
        aligned.unpad(self.pad_cells)
    }

    /// Computes the fetch stack for every direction in `config`.
    ///
    /// One output band per requested direction, in request order. With minor
    /// clustering, each band is the element-wise mean of its cluster's
    /// members; a cell with any absent member stays absent.
    pub fn fetch(&self, config: &FetchConfig) -> Result<FetchStack> {
        config.validate()?;

        let (rows, cols) = self.mask.shape();
        info!(
            directions = config.directions.len(),
            rows, cols, "computing wind fetch stack"
        );

        let mut bands = Vec::with_capacity(config.directions.len());
        match (config.minor_directions, config.minor_interval) {
            (Some(count), Some(interval)) => {
                for &direction in &config.directions {
                    let cluster = minor_cluster(direction, count, interval);
                    debug!(direction, ?cluster, "averaging minor cluster");
                    let mut members = Vec::with_capacity(cluster.len());
                    for angle in cluster {
                        members.push(self.fetch_single_direction(angle)?);
                    }
                    bands.push(mean_of(&members));
                }
            }
            _ => {
                for &direction in &config.directions {
                    debug!(direction, "scanning single direction");
                    bands.push(self.fetch_single_direction(direction)?);
                }
            }
        }

        Ok(FetchStack {
            directions: config.directions.clone(),
            bands,
        })
    }
}

/// Bearings of a minor cluster: `count` angles spaced `interval` degrees
/// apart, shifted so the cluster is centered on `direction`, each wrapped
/// into `[0, 360)`.
fn minor_cluster(direction: f64, count: usize, interval: f64) -> Vec<f64> {
    let mid = (count / 2) as f64 * interval;
    (0..count)
        .map(|i| (direction + i as f64 * interval - mid).rem_euclid(360.0))
        .collect()
}

/// Element-wise mean over same-shaped grids. NaN in any member poisons the
/// mean at that cell, which keeps land and out-of-frame cells absent.
fn mean_of(members: &[Grid<f64>]) -> Grid<f64> {
    let (rows, cols) = members[0].shape();
    let mut out = Grid::filled(rows, cols, 0.0);
    let output = out.as_mut_slice();
    for member in members {
        for (acc, v) in output.iter_mut().zip(member.as_slice()) {
            *acc += v;
        }
    }
    let n = members.len() as f64;
    for acc in output.iter_mut() {
        *acc /= n;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER_ID: i32 = 5;
    const LAND_ID: i32 = 1;

    fn all_water(rows: usize, cols: usize) -> WaterBody {
        let grid = Grid::from_vec(rows, cols, vec![WATER_ID; rows * cols]).unwrap();
        WaterBody::new(&grid, &WATER_ID, 1.0).unwrap()
    }

    #[test]
    fn mask_marks_water_cells_only() {
        let grid = Grid::from_vec(2, 2, vec![WATER_ID, LAND_ID, LAND_ID, WATER_ID]).unwrap();
        let body = WaterBody::new(&grid, &WATER_ID, 10.0).unwrap();
        let mask = body.water_mask().as_slice();
        assert_eq!(mask[0], WATER);
        assert!(mask[1].is_nan());
        assert!(mask[2].is_nan());
        assert_eq!(mask[3], WATER);
    }

    #[test]
    fn construction_rejects_bad_resolution() {
        let grid = Grid::from_vec(2, 2, vec![WATER_ID; 4]).unwrap();
        for resolution in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                WaterBody::new(&grid, &WATER_ID, resolution),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn padding_margin_bounds_rotated_corner_growth() {
        // 3x3 at resolution 1: ceil(sqrt(18) - 3) = 2.
        let grid = Grid::from_vec(3, 3, vec![WATER_ID; 9]).unwrap();
        let body = WaterBody::new(&grid, &WATER_ID, 1.0).unwrap();
        assert_eq!(body.padding_cells(), 2);
    }

    #[test]
    fn zero_degrees_reduces_to_columnwise_ramp() {
        let body = all_water(4, 4);
        let fetch = body.fetch_single_direction(0.0).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(*fetch.get(row, col).unwrap(), (row + 1) as f64);
            }
        }
    }

    #[test]
    fn quarter_turn_scans_across_columns() {
        // At 90 degrees the run grows toward falling column index: wind
        // enters at the east edge and the west shore sees the longest fetch.
        let body = all_water(4, 4);
        let fetch = body.fetch_single_direction(90.0).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(*fetch.get(row, col).unwrap(), (4 - col) as f64);
            }
        }
    }

    #[test]
    fn ninety_degree_bearing_accumulates_from_the_east() {
        let body = all_water(3, 3);
        let fetch = body.fetch_single_direction(90.0).unwrap();
        for row in 0..3 {
            let values: Vec<f64> = (0..3).map(|col| *fetch.get(row, col).unwrap()).collect();
            assert_eq!(values, vec![3.0, 2.0, 1.0]);
        }
    }

    #[test]
    fn land_cells_stay_absent_in_the_result() {
        let grid =
            Grid::from_vec(2, 2, vec![LAND_ID, WATER_ID, WATER_ID, WATER_ID]).unwrap();
        let body = WaterBody::new(&grid, &WATER_ID, 1.0).unwrap();
        let fetch = body.fetch_single_direction(0.0).unwrap();
        assert!(fetch.get(0, 0).unwrap().is_nan());
        assert_eq!(*fetch.get(1, 1).unwrap(), 2.0);
    }

    #[test]
    fn stack_has_one_band_per_requested_direction() {
        let body = all_water(3, 5);
        let stack = body.fetch(&FetchConfig::new(vec![0.0, 90.0, 180.0])).unwrap();
        assert_eq!(stack.shape(), (3, 5, 3));
        assert_eq!(stack.directions(), &[0.0, 90.0, 180.0]);
    }

    #[test]
    fn minor_clusters_collapse_into_one_band() {
        let body = all_water(3, 3);
        let config = FetchConfig::single(0.0)
            .with_minor_directions(3)
            .with_minor_interval(5.0);
        let stack = body.fetch(&config).unwrap();
        assert_eq!(stack.shape(), (3, 3, 1));
    }

    #[test]
    fn stack_without_bands_reports_zero_shape() {
        let stack = FetchStack {
            directions: Vec::new(),
            bands: Vec::new(),
        };
        assert_eq!(stack.shape(), (0, 0, 0));
    }

    #[test]
    fn duplicate_directions_are_computed_independently() {
        let body = all_water(2, 2);
        let stack = body.fetch(&FetchConfig::new(vec![90.0, 90.0])).unwrap();
        assert_eq!(stack.bands().len(), 2);
        assert_eq!(stack.band(0).unwrap(), stack.band(1).unwrap());
    }

    #[test]
    fn singleton_minor_cluster_matches_the_plain_scan() {
        let body = all_water(4, 4);
        let plain = body.fetch(&FetchConfig::single(0.0)).unwrap();
        let clustered = body
            .fetch(
                &FetchConfig::single(0.0)
                    .with_minor_directions(1)
                    .with_minor_interval(15.0),
            )
            .unwrap();
        assert_eq!(plain.band(0).unwrap(), clustered.band(0).unwrap());
    }

    #[test]
    fn minor_cluster_is_centered_and_wrapped() {
        assert_eq!(minor_cluster(30.0, 3, 10.0), vec![20.0, 30.0, 40.0]);
        assert_eq!(minor_cluster(0.0, 3, 10.0), vec![350.0, 0.0, 10.0]);
        assert_eq!(minor_cluster(355.0, 2, 10.0), vec![345.0, 355.0]);
    }

    #[test]
    fn validate_requires_the_full_minor_pair() {
        let missing_interval = FetchConfig::single(0.0).with_minor_directions(3);
        assert!(matches!(
            missing_interval.validate(),
            Err(Error::InvalidParameter(_))
        ));

        let missing_count = FetchConfig::single(0.0).with_minor_interval(5.0);
        assert!(matches!(
            missing_count.validate(),
            Err(Error::InvalidParameter(_))
        ));

        let zero_count = FetchConfig::single(0.0)
            .with_minor_directions(0)
            .with_minor_interval(5.0);
        assert!(matches!(
            zero_count.validate(),
            Err(Error::InvalidParameter(_))
        ));

        assert!(FetchConfig::single(0.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_directions() {
        assert!(matches!(
            FetchConfig::new(Vec::new()).validate(),
            Err(Error::InvalidParameter(_))
        ));
    }
}
