// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Dawn and dusk on the CTU dial.
//!
//! Combines the cached solar noon, the high-accuracy
//! [`solar_coordinates`](crate::solar_coordinates), and the forward
//! conversion: the hour angle at the target elevation is turned into a
//! minute offset either side of noon, and both instants are expressed as
//! CTU wall-clock values.
//!
//! Polar degenerate days surface through [`DawnDusk::extremum`]: a
//! clamped hour angle collapses dawn and dusk onto noon (permanent day)
//! or pushes them to the maximal half-day offset (permanent night), and
//! callers can distinguish either case from an ordinary crossing.

use crate::cache;
use crate::convert::utc_to_ctu_with;
use crate::error::{CtuError, CtuResult};
use crate::noon::NoonSource;
use crate::solar::{hour_angle, julian_date, solar_coordinates, HourAngle};
use crate::wall_clock::CtuWallClock;
use chrono::{Duration, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conventional civil-twilight elevation, degrees.
pub const CIVIL_TWILIGHT: f64 = -6.0;

/// Which polar degeneracy produced a clamped dawn/dusk pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolarExtremum {
    /// The sun never drops below the target elevation: permanent day.
    Day,
    /// The sun never reaches the target elevation: permanent night.
    Night,
}

/// Dawn and dusk expressed in CTU time.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DawnDusk {
    /// The morning crossing of the target elevation.
    pub dawn: CtuWallClock,
    /// The evening crossing of the target elevation.
    pub dusk: CtuWallClock,
    /// Present when the pair comes from a polar clamp rather than a
    /// genuine crossing.
    pub extremum: Option<PolarExtremum>,
}

impl DawnDusk {
    /// True when the sun never crossed the target elevation that day.
    pub const fn is_polar(&self) -> bool {
        self.extremum.is_some()
    }
}

/// Civil-twilight dawn and dusk (−6°) for `date` at the given location.
pub fn dawn_dusk(latitude: f64, longitude: f64, date: NaiveDate) -> CtuResult<DawnDusk> {
    dawn_dusk_at(latitude, longitude, date, CIVIL_TWILIGHT)
}

/// Dawn and dusk for an arbitrary target elevation, degrees.
pub fn dawn_dusk_at(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    target_elevation: f64,
) -> CtuResult<DawnDusk> {
    dawn_dusk_at_with(cache::shared(), latitude, longitude, date, target_elevation)
}

/// [`dawn_dusk_at`] against an explicit noon source.
pub fn dawn_dusk_at_with<S: NoonSource>(
    source: &S,
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    target_elevation: f64,
) -> CtuResult<DawnDusk> {
    let noon = source.noon(longitude, date)?;
    let coords = solar_coordinates(julian_date(noon));
    let angle = hour_angle(latitude, coords.declination, target_elevation);

    let offset_minutes = angle.degrees() * 4.0 + coords.equation_of_time;
    let offset = Duration::microseconds((offset_minutes * 60.0 * 1e6).round() as i64);

    let dawn_utc = noon
        .checked_sub_signed(offset)
        .ok_or(CtuError::DateOutOfRange { date })?;
    let dusk_utc = noon
        .checked_add_signed(offset)
        .ok_or(CtuError::DateOutOfRange { date })?;

    let (dawn, _) = utc_to_ctu_with(source, dawn_utc, longitude)?;
    let (dusk, _) = utc_to_ctu_with(source, dusk_utc, longitude)?;

    let extremum = match angle {
        HourAngle::Crossing(_) => None,
        HourAngle::AlwaysAbove => Some(PolarExtremum::Day),
        HourAngle::NeverAbove => Some(PolarExtremum::Night),
    };

    Ok(DawnDusk {
        dawn,
        dusk,
        extremum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noon::DirectNoon;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stuttgart_midsummer_twilight() {
        let result = dawn_dusk(48.78, 9.1829, date(2025, 6, 21)).unwrap();
        assert!(!result.is_polar());
        assert!(
            (2..=4).contains(&result.dawn.hour()),
            "dawn {}",
            result.dawn
        );
        assert!(
            (19..=21).contains(&result.dusk.hour()),
            "dusk {}",
            result.dusk
        );
    }

    #[test]
    fn winter_twilight_is_much_shorter() {
        let summer = dawn_dusk(48.78, 9.1829, date(2025, 6, 21)).unwrap();
        let winter = dawn_dusk(48.78, 9.1829, date(2025, 12, 21)).unwrap();
        let lit = |dd: &DawnDusk| dd.dusk.dial_seconds() - dd.dawn.dial_seconds();
        assert!(lit(&summer) > lit(&winter) + 4.0 * 3600.0);
    }

    #[test]
    fn polar_day_collapses_onto_noon() {
        let result = dawn_dusk(78.0, 15.6, date(2025, 6, 21)).unwrap();
        assert_eq!(result.extremum, Some(PolarExtremum::Day));
        assert!(result.is_polar());
        // Both crossings sit within minutes of noon. On the dial that
        // reads as 12:0x, or as the elastic 23:5x labels for the side
        // that lands just before noon.
        let near_noon = |w: CtuWallClock| w.hour() == 12 || w.hour() == 23;
        assert!(near_noon(result.dawn), "dawn {}", result.dawn);
        assert!(near_noon(result.dusk), "dusk {}", result.dusk);
    }

    #[test]
    fn polar_night_spans_the_maximal_offset() {
        let result = dawn_dusk(78.0, 15.6, date(2025, 12, 21)).unwrap();
        assert_eq!(result.extremum, Some(PolarExtremum::Night));
        // A 180° clamp lands both crossings half a day from noon, i.e.
        // around CTU midnight.
        assert!(result.dawn.hour() >= 23 || result.dawn.hour() == 0);
        assert!(result.dusk.hour() >= 23 || result.dusk.hour() == 0);
    }

    #[test]
    fn lower_elevation_widens_the_lit_interval() {
        let civil = dawn_dusk_at(48.78, 9.1829, date(2025, 3, 20), CIVIL_TWILIGHT).unwrap();
        let nautical = dawn_dusk_at(48.78, 9.1829, date(2025, 3, 20), -12.0).unwrap();
        assert!(nautical.dawn < civil.dawn);
        assert!(nautical.dusk > civil.dusk);
    }

    #[test]
    fn cached_and_direct_sources_agree() {
        let cached = dawn_dusk(48.78, 9.1829, date(2025, 9, 1)).unwrap();
        let direct =
            dawn_dusk_at_with(&DirectNoon, 48.78, 9.1829, date(2025, 9, 1), CIVIL_TWILIGHT)
                .unwrap();
        assert_eq!(cached, direct);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let result = dawn_dusk(48.78, 9.1829, date(2025, 6, 21)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: DawnDusk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
