// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Midnight drift — the signed excess of a solar day over 86 400 s.
//!
//! The drift for date *d* is the amount by which *d*'s elastic midnight
//! hour must stretch or shrink so the following solar noon lands exactly
//! on 12:00:00 CTU.

use crate::cache;
use crate::error::{CtuError, CtuResult};
use crate::noon::NoonSource;
use chrono::{Duration, NaiveDate};
use qtty::Seconds;

/// Seconds in a nominal civil day.
pub(crate) const NOMINAL_DAY: f64 = 86_400.0;

/// Signed seconds in `duration`, microsecond-precise, falling back to
/// whole seconds for durations too large for an `i64` of microseconds.
pub(crate) fn signed_seconds(duration: Duration) -> f64 {
    match duration.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => duration.num_seconds() as f64,
    }
}

/// Length of the solar day starting at `date`'s noon, minus 86 400 s.
///
/// Uses the process-wide noon cache; see [`midnight_drift_with`] to
/// supply another [`NoonSource`].
pub fn midnight_drift(longitude: f64, date: NaiveDate) -> CtuResult<Seconds> {
    midnight_drift_with(cache::shared(), longitude, date)
}

/// [`midnight_drift`] against an explicit noon source.
pub fn midnight_drift_with<S: NoonSource>(
    source: &S,
    longitude: f64,
    date: NaiveDate,
) -> CtuResult<Seconds> {
    let today_noon = source.noon(longitude, date)?;
    let next = date.succ_opt().ok_or(CtuError::DateOutOfRange { date })?;
    let tomorrow_noon = source.noon(longitude, next)?;
    Ok(Seconds::new(
        signed_seconds(tomorrow_noon - today_noon) - NOMINAL_DAY,
    ))
}
