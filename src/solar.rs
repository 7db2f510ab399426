// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar Position Engine
//!
//! High-accuracy solar coordinates backing the dawn/dusk calculator:
//! Julian dates, the sun's declination and equation of time from the
//! NOAA low-order series, and the hour angle at which the sun crosses a
//! target elevation.
//!
//! This engine is intentionally independent of the cheap equation-of-time
//! series behind [`solar_noon`](crate::solar_noon): the converter's hot
//! path needs a fast approximation with stable round-trip behaviour,
//! while dawn/dusk wants sub-minute coordinates. Merging the two would
//! change the round-trip error characteristics of the converter.
//!
//! ## References
//! * Jean Meeus — *Astronomical Algorithms* (2nd ed. 1998), ch. 7 & 25.
//! * NOAA Global Monitoring Division solar calculator equations.

use chrono::{DateTime, Datelike, Timelike, Utc};
use qtty::{Centuries, Days, Simplify};

/// Mean obliquity of the ecliptic used by the low-order series, degrees.
const OBLIQUITY_DEG: f64 = 23.44;

// ═══════════════════════════════════════════════════════════════════════════
// Julian dates
// ═══════════════════════════════════════════════════════════════════════════

/// Continuous count of days since the Julian Period, with fractional day.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDate(Days);

impl JulianDate {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Create from a raw Julian Day number.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(Days::new(value))
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0.value()
    }

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(((self.0 - Self::J2000.0) / Self::JULIAN_CENTURY).simplify().value())
    }
}

impl std::fmt::Display for JulianDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {}", self.0)
    }
}

/// Julian date of a UTC instant, sub-second precise.
///
/// Uses the civil-calendar-to-JDN formula (Meeus ch. 7) for the date
/// part plus the fractional day of the instant.
pub fn julian_date(instant: DateTime<Utc>) -> JulianDate {
    let date = instant.date_naive();
    let (mut y, mut m) = (date.year() as i64, date.month() as i64);
    if m <= 2 {
        y -= 1;
        m += 12;
    }
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);

    // JD at 00:00 UTC of the civil date.
    let jd_midnight = (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * (m as f64 + 1.0)).floor()
        + date.day() as f64
        + b as f64
        - 1524.5;

    let time = instant.time();
    let day_fraction =
        (time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9) / 86_400.0;
    JulianDate::new(jd_midnight + day_fraction)
}

// ═══════════════════════════════════════════════════════════════════════════
// Solar coordinates
// ═══════════════════════════════════════════════════════════════════════════

/// Geocentric solar coordinates from the NOAA low-order series.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarCoordinates {
    /// Apparent declination of the sun, degrees.
    pub declination: f64,
    /// Equation of time, minutes (apparent minus mean solar time).
    pub equation_of_time: f64,
}

/// Solar declination and equation of time at `jd`.
pub fn solar_coordinates(jd: JulianDate) -> SolarCoordinates {
    let t = jd.julian_centuries().value();

    // Mean longitude, mean anomaly, orbital eccentricity.
    let mean_long = (280.46646 + t * (36_000.76983 + t * 0.000_303_2)).rem_euclid(360.0);
    let mean_anom = 357.52911 + t * (35_999.05029 - 0.000_153_7 * t);
    let ecc = 0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t);

    // Equation of center and true longitude.
    let m_rad = mean_anom.to_radians();
    let center = (1.914_602 - t * (0.004_817 + 0.000_014 * t)) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();
    let true_long = mean_long + center;

    let obliquity_sin = OBLIQUITY_DEG.to_radians().sin();
    let declination = (true_long.to_radians().sin() * obliquity_sin).asin().to_degrees();

    // Equation of time (NOAA), in minutes.
    let y = (OBLIQUITY_DEG / 2.0).to_radians().tan().powi(2);
    let l_rad = mean_long.to_radians();
    let eot_rad = y * (2.0 * l_rad).sin() - 2.0 * ecc * m_rad.sin()
        + 4.0 * ecc * y * m_rad.sin() * (2.0 * l_rad).cos()
        - 0.5 * y * y * (4.0 * l_rad).sin()
        - 1.25 * ecc * ecc * (2.0 * m_rad).sin();

    SolarCoordinates {
        declination,
        equation_of_time: 4.0 * eot_rad.to_degrees(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Hour angle
// ═══════════════════════════════════════════════════════════════════════════

/// Hour angle at which the sun crosses a target elevation, or the typed
/// clamp when no crossing exists that day.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HourAngle {
    /// The sun crosses the target elevation at this angle, degrees
    /// `[0, 180]` either side of the meridian.
    Crossing(f64),
    /// The sun stays above the target elevation all day (reads as 0°).
    AlwaysAbove,
    /// The sun never reaches the target elevation (reads as 180°).
    NeverAbove,
}

impl HourAngle {
    /// The angle in degrees, with the clamps reading 0° and 180°.
    pub const fn degrees(&self) -> f64 {
        match self {
            Self::Crossing(h) => *h,
            Self::AlwaysAbove => 0.0,
            Self::NeverAbove => 180.0,
        }
    }

    /// True when the value comes from a polar clamp rather than a
    /// genuine crossing.
    pub const fn is_clamped(&self) -> bool {
        !matches!(self, Self::Crossing(_))
    }
}

/// Solve `cos H = (sin elev − sin lat · sin dec) / (cos lat · cos dec)`.
///
/// All arguments in degrees. A ratio beyond ±1 means the sun never
/// crosses `target_elevation` that day and yields the corresponding
/// clamp instead of an invalid angle.
pub fn hour_angle(latitude: f64, declination: f64, target_elevation: f64) -> HourAngle {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    let elev = target_elevation.to_radians();

    let cos_h = (elev.sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    // 0/0 exactly at a pole reads as a sun grazing the target all day.
    if cos_h.is_nan() || cos_h >= 1.0 {
        HourAngle::NeverAbove
    } else if cos_h <= -1.0 {
        HourAngle::AlwaysAbove
    } else {
        HourAngle::Crossing(cos_h.acos().to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn julian_date_of_j2000_epoch() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = julian_date(epoch);
        assert!((jd.value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn julian_date_of_1999_new_year() {
        let instant = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        assert!((julian_date(instant).value() - 2_451_179.5).abs() < 1e-9);
    }

    #[test]
    fn julian_date_carries_subsecond_fraction() {
        let base = Utc.with_ymd_and_hms(2025, 4, 10, 0, 0, 0).unwrap();
        let later = base + chrono::Duration::microseconds(500_000);
        let delta = julian_date(later).value() - julian_date(base).value();
        assert!((delta - 0.5 / 86_400.0).abs() < 1e-12);
    }

    #[test]
    fn one_century_after_j2000() {
        let jd = JulianDate::new(2_451_545.0 + 36_525.0);
        assert!((jd.julian_centuries().value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coordinates_at_j2000() {
        // Reference values for 2000-01-01T12:00: δ ≈ −23.0°, EoT ≈ −3.3 min.
        let coords = solar_coordinates(JulianDate::J2000);
        assert!((coords.declination - (-23.03)).abs() < 0.2);
        assert!((coords.equation_of_time - (-3.3)).abs() < 0.3);
    }

    #[test]
    fn declination_peaks_at_the_june_solstice() {
        let jd = julian_date(Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap());
        let coords = solar_coordinates(jd);
        assert!((coords.declination - OBLIQUITY_DEG).abs() < 0.2);
    }

    #[test]
    fn declination_vanishes_near_the_march_equinox() {
        let jd = julian_date(Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap());
        let coords = solar_coordinates(jd);
        assert!(coords.declination.abs() < 0.6);
    }

    #[test]
    fn equation_of_time_peaks_in_early_november() {
        let jd = julian_date(Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap());
        let coords = solar_coordinates(jd);
        assert!((coords.equation_of_time - 16.4).abs() < 0.5);
    }

    #[test]
    fn equatorial_sunset_is_six_hours_from_noon() {
        // At the equator on an equinox the sun sets 90° from the meridian.
        match hour_angle(0.0, 0.0, 0.0) {
            HourAngle::Crossing(h) => assert!((h - 90.0).abs() < 1e-9),
            other => panic!("expected crossing, got {other:?}"),
        }
    }

    #[test]
    fn high_latitude_summer_never_drops_below_civil_twilight() {
        let ha = hour_angle(80.0, 20.0, -6.0);
        assert_eq!(ha, HourAngle::AlwaysAbove);
        assert_eq!(ha.degrees(), 0.0);
        assert!(ha.is_clamped());
    }

    #[test]
    fn high_latitude_winter_never_reaches_civil_twilight() {
        let ha = hour_angle(80.0, -20.0, -6.0);
        assert_eq!(ha, HourAngle::NeverAbove);
        assert_eq!(ha.degrees(), 180.0);
        assert!(ha.is_clamped());
    }

    #[test]
    fn midlatitude_twilight_angle_is_plausible() {
        let ha = hour_angle(48.78, 10.0, -6.0);
        match ha {
            HourAngle::Crossing(h) => assert!(h > 90.0 && h < 130.0, "H = {h}"),
            other => panic!("expected crossing, got {other:?}"),
        }
        assert!(!ha.is_clamped());
    }
}
