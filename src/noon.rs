// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar Noon — Cheap Equation-of-Time Series
//!
//! Computes the UTC instant at which the sun crosses the local meridian
//! for a (longitude, calendar date) pair. The equation of time is a
//! four-term harmonic fit:
//!
//! ```text
//! B   = (360° / 365.2422) · (n − 81)        n = ordinal day of year
//! EoT = 9.87·sin 2B − 7.53·cos B − 1.5·sin B + 0.21·cos 2B   [minutes]
//! ```
//!
//! and solar noon falls at `12h − (longitude/15 + EoT/60)` hours UTC on
//! the given date. Accuracy is tens of seconds, which is what the
//! converter's hot path needs; the independent high-accuracy series used
//! for dawn/dusk ([`solar_coordinates`](crate::solar_coordinates)) must
//! not be merged with this one — the two are calibrated for different
//! call sites.
//!
//! [`NoonSource`] is the seam between the converter and this function:
//! production code routes through the bounded memo table
//! ([`NoonCache`](crate::NoonCache)), while [`DirectNoon`] recomputes on
//! every call and exists to demonstrate that caching never changes a
//! result.

use crate::error::{CtuError, CtuResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Degrees the mean sun advances per calendar day.
const MEAN_DEGREES_PER_DAY: f64 = 360.0 / 365.2422;

/// Supplier of solar-noon instants.
///
/// Implementations must return bit-identical instants for equal
/// `(longitude, date)` arguments, so that swapping one implementation
/// for another is unobservable to callers.
pub trait NoonSource {
    /// The UTC instant of solar noon at `longitude` on `date`.
    fn noon(&self, longitude: f64, date: NaiveDate) -> CtuResult<DateTime<Utc>>;
}

/// Cache-free [`NoonSource`]: recomputes the series on every call.
#[derive(Debug, Copy, Clone, Default)]
pub struct DirectNoon;

impl NoonSource for DirectNoon {
    #[inline]
    fn noon(&self, longitude: f64, date: NaiveDate) -> CtuResult<DateTime<Utc>> {
        solar_noon(longitude, date)
    }
}

/// The UTC instant of solar noon at `longitude` (degrees, positive east)
/// on `date`, rounded to the nearest microsecond.
///
/// Any finite longitude is accepted; values far outside ±180° simply
/// place the result outside a plausible same-day window. The only error
/// is [`CtuError::DateOutOfRange`] when the instant cannot be
/// represented.
///
/// ```
/// use chrono::{Datelike, NaiveDate};
/// use ctu_time::solar_noon;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// let noon = solar_noon(0.0, date).unwrap();
/// assert_eq!(noon.date_naive().day(), 29);
/// ```
pub fn solar_noon(longitude: f64, date: NaiveDate) -> CtuResult<DateTime<Utc>> {
    let eot_minutes = equation_of_time_minutes(date.ordinal());
    let noon_hours = 12.0 - (longitude / 15.0 + eot_minutes / 60.0);

    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    let offset_micros = (noon_hours * 3_600.0 * 1e6).round() as i64;
    midnight
        .checked_add_signed(Duration::microseconds(offset_micros))
        .ok_or(CtuError::DateOutOfRange { date })
}

/// Equation of time in minutes for the 1-based ordinal day `n`.
fn equation_of_time_minutes(n: u32) -> f64 {
    let b = (MEAN_DEGREES_PER_DAY * (n as f64 - 81.0)).to_radians();
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin() + 0.21 * (2.0 * b).cos()
}
