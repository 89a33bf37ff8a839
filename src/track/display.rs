//! # Compact display for normalized tracks
//!
//! A zero-copy display adaptor to print a normalized track as a fixed-width
//! table, one telemetry sample per row:
//!
//! ```text
//! #    | Time     |      Lat |      Lon |  Alt m | AGL m | km/h |  m/s
//! ```
//!
//! The adaptor **borrows** the samples and renders when formatted with `{}`.
//! Tracks easily reach thousands of samples, so [`TrackDisplay::with_stride`]
//! renders every n-th row for log-friendly output; the first and last samples
//! are always included.

use std::fmt;

use crate::track::NormalizedTrackPoint;

/// Borrowing display adaptor for `&[NormalizedTrackPoint]`.
pub struct TrackDisplay<'a> {
    track: &'a [NormalizedTrackPoint],
    stride: usize,
}

impl<'a> TrackDisplay<'a> {
    pub fn new(track: &'a [NormalizedTrackPoint]) -> Self {
        TrackDisplay { track, stride: 1 }
    }

    /// Render every `stride`-th sample (first and last rows always shown).
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride.max(1);
        self
    }
}

impl fmt::Display for TrackDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5} | {:8} | {:>9} | {:>9} | {:>6} | {:>6} | {:>6} | {:>6}",
            "#", "Time", "Lat", "Lon", "Alt m", "AGL m", "km/h", "m/s"
        )?;
        let last = self.track.len().saturating_sub(1);
        for (i, p) in self.track.iter().enumerate() {
            if i % self.stride != 0 && i != last {
                continue;
            }
            writeln!(
                f,
                "{:>5} | {:8} | {:>9.5} | {:>9.5} | {:>6.0} | {:>6.0} | {:>6.1} | {:>6.1}",
                i, p.time_label, p.lat, p.lon, p.altitude, p.agl, p.speed, p.climb_rate
            )?;
        }
        Ok(())
    }
}

/// Extension to obtain a [`TrackDisplay`] directly from a track slice.
pub trait TrackDisplayExt {
    fn show(&self) -> TrackDisplay<'_>;
}

impl TrackDisplayExt for [NormalizedTrackPoint] {
    fn show(&self) -> TrackDisplay<'_> {
        TrackDisplay::new(self)
    }
}
