use hifitime::{Epoch, TimeScale};

use crate::constants::{Minutes, UnixSeconds};

/// Convert a unix timestamp (seconds, UTC) to a [`hifitime::Epoch`].
///
/// Argument
/// --------
/// * `t`: seconds since the Unix epoch, fractional seconds allowed
///
/// Return
/// ------
/// * the corresponding `Epoch` in the UTC time scale
pub fn unix_to_epoch(t: UnixSeconds) -> Epoch {
    Epoch::from_unix_seconds(t)
}

/// Convert a [`hifitime::Epoch`] back to unix seconds (UTC).
pub fn epoch_to_unix(epoch: Epoch) -> UnixSeconds {
    epoch.to_unix_seconds()
}

/// Format a unix timestamp as the wall-clock label shown on telemetry charts.
///
/// Argument
/// --------
/// * `t`: seconds since the Unix epoch
///
/// Return
/// ------
/// * a `HH:MM:SS` label in UTC
pub fn time_label(t: UnixSeconds) -> String {
    let (_, _, _, hour, minute, second, _) =
        unix_to_epoch(t).to_gregorian(TimeScale::UTC);
    format!("{hour:02}:{minute:02}:{second:02}")
}

/// Format a flight duration in minutes as a human-readable label.
///
/// Mirrors the presentation rule used across the AeroLog platform:
/// `"2h 5min"` above one hour, `"45min"` below, and `"0min"` for
/// negative or non-finite input.
///
/// Argument
/// --------
/// * `total_minutes`: duration in minutes
///
/// Return
/// ------
/// * a formatted duration label
pub fn format_duration(total_minutes: Minutes) -> String {
    if !total_minutes.is_finite() || total_minutes < 0.0 {
        return "0min".to_string();
    }
    let rounded = total_minutes.round() as u64;
    let hours = rounded / 60;
    let minutes = rounded % 60;

    if hours > 0 {
        format!("{hours}h {minutes}min")
    } else {
        format!("{minutes}min")
    }
}
