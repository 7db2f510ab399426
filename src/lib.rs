// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! CTU Timekeeping
//!
//! CTU is a solar-referenced timekeeping scheme: 12:00:00 on the CTU
//! dial always coincides with true solar noon at the given longitude,
//! and a single elastic hour (nominally 23:00–24:00) absorbs the daily
//! drift between the fixed 86 400-second civil day and the variable
//! true solar day. No time zones, no DST — the longitude is the clock.
//!
//! # Core types
//!
//! - [`CtuWallClock`] — a point on the 24-hour CTU dial, microsecond
//!   resolution; needs its companion CTU date to resolve to an instant.
//! - [`NoonSource`] — seam for supplying solar-noon instants.
//! - [`NoonCache`] — bounded LRU memo over the noon series (the only
//!   stateful component); [`DirectNoon`] is the cache-free equivalent.
//! - [`CtuError`] / [`CtuResult`] — typed failures.
//!
//! # Operations
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`solar_noon`] | UTC instant of solar noon for (longitude, date) |
//! | [`midnight_drift`] | solar day length minus 86 400 s |
//! | [`utc_to_ctu`] / [`utc_to_ctu_anchored`] | UTC instant → CTU dial (+ CTU date) |
//! | [`ctu_to_utc`] | CTU dial + CTU date → UTC instant |
//! | [`dawn_dusk`] / [`dawn_dusk_at`] | twilight crossings in CTU time |
//! | [`now`] | current CTU time at a longitude |
//!
//! Instants are `chrono::DateTime<Utc>` throughout: UTC qualification is
//! part of the type, so an unqualified local timestamp cannot be passed
//! by accident. Calendar dates are proleptic-Gregorian
//! `chrono::NaiveDate`.
//!
//! # Quick example
//!
//! ```
//! use chrono::NaiveDate;
//! use ctu_time::{ctu_to_utc, solar_noon, utc_to_ctu_anchored};
//!
//! let stuttgart = 9.1829;
//! let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
//!
//! // Solar noon reads 12:00:00.000000 on the dial, by construction.
//! let noon = solar_noon(stuttgart, date).unwrap();
//! let (wall, ctu_date) = utc_to_ctu_anchored(noon, stuttgart).unwrap();
//! assert_eq!(wall.to_string(), "12:00:00.000000");
//!
//! // The pair (wall clock, CTU date) resolves back to the instant.
//! assert_eq!(ctu_to_utc(wall, ctu_date, stuttgart).unwrap(), noon);
//! ```

mod cache;
mod convert;
mod drift;
mod error;
mod noon;
mod solar;
mod twilight;
mod wall_clock;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use cache::NoonCache;
pub use convert::{ctu_to_utc, ctu_to_utc_with, utc_to_ctu, utc_to_ctu_anchored, utc_to_ctu_with};
pub use drift::{midnight_drift, midnight_drift_with};
pub use error::{CtuError, CtuResult};
pub use noon::{solar_noon, DirectNoon, NoonSource};
pub use solar::{
    hour_angle, julian_date, solar_coordinates, HourAngle, JulianDate, SolarCoordinates,
};
pub use twilight::{
    dawn_dusk, dawn_dusk_at, dawn_dusk_at_with, DawnDusk, PolarExtremum, CIVIL_TWILIGHT,
};
pub use wall_clock::CtuWallClock;

/// Current CTU time at `longitude`, from the system clock.
///
/// Convenience wrapper over [`utc_to_ctu`]; correctness tracks the host
/// clock, so anything needing reproducible instants should call
/// [`utc_to_ctu`] with an explicit instant instead.
pub fn now(longitude: f64) -> CtuResult<CtuWallClock> {
    utc_to_ctu(chrono::Utc::now(), longitude)
}
