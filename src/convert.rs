// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # UTC ↔ CTU Conversion
//!
//! CTU anchors its dial to the local solar noon: 12:00:00 CTU *is* solar
//! noon, every day, at every longitude. Because true solar days are not
//! 86 400 s long, one dial hour is elastic: the 23:00–24:00 hour
//! immediately preceding the next solar noon absorbs the day's drift.
//!
//! Each solar day is anchored at its opening noon and split into two
//! regimes:
//!
//! - **Standard**: the first 23 nominal hours after the anchoring noon
//!   map 1:1 to the dial, which runs 12:00 → 23:00 → 00:00 → 10:59.
//! - **Elastic**: the remaining real interval up to the next noon
//!   (nominally 3600 s plus the midnight drift) maps linearly onto the
//!   dial hour 23:00 → 24:00. The dial labels 11:00–11:59 are replaced
//!   by this second pass over the 23:00 hour; at the next noon the dial
//!   reads 12:00 again.
//!
//! A wall-clock value therefore resolves to an instant only together
//! with its **CTU date** — the calendar date of the anchoring noon.
//! [`utc_to_ctu_anchored`] returns it; [`ctu_to_utc`] consumes it. With
//! that companion date the inverse is the exact algebraic inverse of the
//! forward map, and round-trips are lossless up to microsecond rounding.

use crate::cache;
use crate::drift::{midnight_drift_with, signed_seconds, NOMINAL_DAY};
use crate::error::{CtuError, CtuResult};
use crate::noon::NoonSource;
use crate::wall_clock::CtuWallClock;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Dial position of solar noon, seconds past CTU midnight.
const DIAL_NOON: f64 = 43_200.0;

/// Real seconds covered by the standard regime: 23 nominal hours.
const STANDARD_SPAN: f64 = 82_800.0;

/// Nominal length of the elastic hour on the dial.
const NOMINAL_HOUR: f64 = 3_600.0;

/// Convert a UTC instant to the CTU dial at `longitude`.
///
/// Shorthand for [`utc_to_ctu_anchored`] when the companion CTU date is
/// not needed.
///
/// ```
/// use chrono::NaiveDate;
/// use ctu_time::{solar_noon, utc_to_ctu};
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
/// let noon = solar_noon(9.1829, date).unwrap();
/// let wall = utc_to_ctu(noon, 9.1829).unwrap();
/// assert_eq!(wall.to_string(), "12:00:00.000000");
/// ```
pub fn utc_to_ctu(instant: DateTime<Utc>, longitude: f64) -> CtuResult<CtuWallClock> {
    utc_to_ctu_with(cache::shared(), instant, longitude).map(|(wall, _)| wall)
}

/// Convert a UTC instant to the CTU dial, also returning the CTU date —
/// the calendar date of the anchoring noon. Feeding both back into
/// [`ctu_to_utc`] recovers the instant.
pub fn utc_to_ctu_anchored(
    instant: DateTime<Utc>,
    longitude: f64,
) -> CtuResult<(CtuWallClock, NaiveDate)> {
    utc_to_ctu_with(cache::shared(), instant, longitude)
}

/// [`utc_to_ctu_anchored`] against an explicit noon source.
pub fn utc_to_ctu_with<S: NoonSource>(
    source: &S,
    instant: DateTime<Utc>,
    longitude: f64,
) -> CtuResult<(CtuWallClock, NaiveDate)> {
    let (anchor, schedule_date) = most_recent_noon(source, instant, longitude)?;
    let elapsed = signed_seconds(instant - anchor);
    let elastic_span = elastic_span(source, longitude, schedule_date)?;

    let dial = if elapsed <= STANDARD_SPAN {
        elapsed + DIAL_NOON
    } else {
        let into_elastic = elapsed - STANDARD_SPAN;
        STANDARD_SPAN + into_elastic / elastic_span * NOMINAL_HOUR
    };

    let wall = CtuWallClock::from_dial_seconds(dial.rem_euclid(NOMINAL_DAY));
    Ok((wall, schedule_date))
}

/// Resolve a CTU wall clock on `ctu_date` back to the UTC instant.
///
/// `ctu_date` is the calendar date of the anchoring noon, as returned by
/// [`utc_to_ctu_anchored`]. Dial positions at or past 23:00 invert
/// through the elastic regime; every other position inverts through the
/// standard regime of the noon-to-noon cycle opened by `ctu_date`.
pub fn ctu_to_utc(
    wall: CtuWallClock,
    ctu_date: NaiveDate,
    longitude: f64,
) -> CtuResult<DateTime<Utc>> {
    ctu_to_utc_with(cache::shared(), wall, ctu_date, longitude)
}

/// [`ctu_to_utc`] against an explicit noon source.
pub fn ctu_to_utc_with<S: NoonSource>(
    source: &S,
    wall: CtuWallClock,
    ctu_date: NaiveDate,
    longitude: f64,
) -> CtuResult<DateTime<Utc>> {
    let noon = source.noon(longitude, ctu_date)?;
    let elastic_span = elastic_span(source, longitude, ctu_date)?;

    let dial = wall.dial_seconds();
    let elapsed = if dial < STANDARD_SPAN {
        // The cycle runs noon → noon, so pre-noon dial labels sit in its
        // back half; the Euclidean wrap selects that occurrence.
        (dial - DIAL_NOON).rem_euclid(NOMINAL_DAY)
    } else {
        let into_elastic = dial - STANDARD_SPAN;
        STANDARD_SPAN + into_elastic / NOMINAL_HOUR * elastic_span
    };

    let offset = Duration::microseconds((elapsed * 1e6).round() as i64);
    noon.checked_add_signed(offset)
        .ok_or(CtuError::DateOutOfRange { date: ctu_date })
}

/// Real-world span of the elastic hour for the solar day opened by
/// `schedule_date`. Non-positive spans make the mapping ill-posed and
/// are reported, never divided through.
fn elastic_span<S: NoonSource>(
    source: &S,
    longitude: f64,
    schedule_date: NaiveDate,
) -> CtuResult<f64> {
    let drift = midnight_drift_with(source, longitude, schedule_date)?.value();
    let span = NOMINAL_HOUR + drift;
    if span <= 0.0 {
        return Err(CtuError::DegenerateDay {
            drift_seconds: drift,
        });
    }
    Ok(span)
}

/// The most recent solar noon at or before `instant`, with its calendar
/// date.
///
/// Noons of calendar dates `d+1 ..= d−1` are scanned because near ±180°
/// longitude the noon of date d can fall on the neighbouring civil date.
/// If every candidate lies after the instant (longitudes far outside
/// ±180°), the earliest candidate is used and the dial wrap absorbs the
/// negative elapsed time.
fn most_recent_noon<S: NoonSource>(
    source: &S,
    instant: DateTime<Utc>,
    longitude: f64,
) -> CtuResult<(DateTime<Utc>, NaiveDate)> {
    let date = instant.date_naive();
    let mut candidate = date.succ_opt().ok_or(CtuError::DateOutOfRange { date })?;
    for _ in 0..3 {
        let noon = source.noon(longitude, candidate)?;
        if noon <= instant {
            return Ok((noon, candidate));
        }
        candidate = candidate
            .pred_opt()
            .ok_or(CtuError::DateOutOfRange { date: candidate })?;
    }
    let noon = source.noon(longitude, candidate)?;
    Ok((noon, candidate))
}
