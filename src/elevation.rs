//! # Terrain elevation collaborator
//!
//! AGL computation needs the terrain altitude under each track point. Terrain
//! data is owned by an **external collaborator** (raster tiles, DEM service,
//! …); the engine only sees the [`ElevationModel`] trait. Lookups may be
//! approximate or interpolated, and a failing provider is never fatal: the
//! normalizer degrades to `agl = altitude` and flags the analysis
//! ([`AnalysisWarning::ElevationUnavailable`](crate::aerolog_errors::AnalysisWarning)).
//!
//! Two reference implementations ship with the crate:
//!
//! - [`ConstantElevation`] – flat terrain at a fixed altitude (tests, sea-side
//!   sites).
//! - [`GridElevation`] – bilinear interpolation over a regular lat/lon grid of
//!   samples, the shape a DEM tile collaborator would hand over.
//!
//! The scorer never performs elevation lookups; only the normalizer does.

use thiserror::Error;

use crate::constants::{Degree, Meter};
use crate::geodesy::GeoPoint;

/// Error returned by a failing terrain collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElevationError {
    #[error("Coordinate ({lat}, {lon}) is outside the coverage of the elevation model")]
    OutOfCoverage { lat: Degree, lon: Degree },

    #[error("Elevation provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// Terrain altitude lookup, supplied by an external terrain-data collaborator.
///
/// Implementations must be cheap to call once per track point and safe to share
/// across the per-flight analysis workers (`Send + Sync`).
pub trait ElevationModel: Send + Sync {
    /// Terrain altitude at the given coordinate, in meters above sea level.
    fn lookup_elevation(&self, lat: Degree, lon: Degree) -> Result<Meter, ElevationError>;

    /// Batched profile lookup along a sequence of coordinates.
    ///
    /// The default implementation performs point-wise lookups; providers backed
    /// by tiled rasters can override it with a bulk read.
    fn lookup_profile(&self, coords: &[GeoPoint]) -> Result<Vec<Meter>, ElevationError> {
        coords
            .iter()
            .map(|c| self.lookup_elevation(c.lat, c.lon))
            .collect()
    }
}

/// Flat terrain at a constant altitude.
#[derive(Debug, Clone, Copy)]
pub struct ConstantElevation(pub Meter);

impl ElevationModel for ConstantElevation {
    fn lookup_elevation(&self, _lat: Degree, _lon: Degree) -> Result<Meter, ElevationError> {
        Ok(self.0)
    }
}

/// Regular lat/lon grid of terrain samples with bilinear interpolation.
///
/// Samples are stored row-major, `rows` along latitude starting at `lat0`
/// (southernmost row first) and `cols` along longitude starting at `lon0`,
/// both with a spacing of `step` degrees.
#[derive(Debug, Clone)]
pub struct GridElevation {
    lat0: Degree,
    lon0: Degree,
    step: Degree,
    rows: usize,
    cols: usize,
    samples: Vec<Meter>,
}

impl GridElevation {
    /// Build a grid model from row-major samples.
    ///
    /// Arguments
    /// ---------
    /// * `lat0`, `lon0`: coordinate of the south-west corner sample
    /// * `step`: grid spacing in degrees (strictly positive)
    /// * `rows`, `cols`: grid dimensions (at least 2×2)
    /// * `samples`: `rows * cols` terrain altitudes in meters
    ///
    /// Return
    /// ------
    /// * the model, or `None` if the dimensions do not match the sample count
    pub fn new(
        lat0: Degree,
        lon0: Degree,
        step: Degree,
        rows: usize,
        cols: usize,
        samples: Vec<Meter>,
    ) -> Option<Self> {
        if step <= 0.0 || rows < 2 || cols < 2 || samples.len() != rows * cols {
            return None;
        }
        Some(GridElevation {
            lat0,
            lon0,
            step,
            rows,
            cols,
            samples,
        })
    }

    #[inline]
    fn sample(&self, row: usize, col: usize) -> Meter {
        self.samples[row * self.cols + col]
    }
}

impl ElevationModel for GridElevation {
    fn lookup_elevation(&self, lat: Degree, lon: Degree) -> Result<Meter, ElevationError> {
        let x = (lon - self.lon0) / self.step;
        let y = (lat - self.lat0) / self.step;

        if x < 0.0 || y < 0.0 || x > (self.cols - 1) as f64 || y > (self.rows - 1) as f64 {
            return Err(ElevationError::OutOfCoverage { lat, lon });
        }

        // Points on the northern/eastern edge interpolate inside the last cell.
        let col = (x.floor() as usize).min(self.cols - 2);
        let row = (y.floor() as usize).min(self.rows - 2);
        let fx = x - col as f64;
        let fy = y - row as f64;

        let z00 = self.sample(row, col);
        let z01 = self.sample(row, col + 1);
        let z10 = self.sample(row + 1, col);
        let z11 = self.sample(row + 1, col + 1);

        let z0 = z00 + (z01 - z00) * fx;
        let z1 = z10 + (z11 - z10) * fx;
        Ok(z0 + (z1 - z0) * fy)
    }
}
