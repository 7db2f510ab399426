// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! CTU dial values.
//!
//! [`CtuWallClock`] is a point on the 24-hour CTU dial with microsecond
//! resolution. It is *not* an absolute instant: resolving it to UTC
//! requires the companion calendar date of the solar day it belongs to
//! (see [`ctu_to_utc`](crate::ctu_to_utc)).

use crate::error::{CtuError, CtuResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Microseconds on a full 24-hour dial.
const DIAL_MICROS: i64 = 86_400_000_000;

/// A CTU wall-clock reading: hour `[0,23]`, minute/second `[0,59]`,
/// microsecond `[0,999999]`.
///
/// The struct is `Copy` and totally ordered by dial position. Construct
/// validated values with [`CtuWallClock::new`]; conversions produce them
/// via microsecond rounding with clean carry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CtuWallClock {
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
}

impl CtuWallClock {
    /// Solar noon on the dial: `12:00:00.000000`.
    pub const NOON: Self = Self {
        hour: 12,
        minute: 0,
        second: 0,
        microsecond: 0,
    };

    /// Create a wall-clock value, validating every field.
    pub fn new(hour: u8, minute: u8, second: u8, microsecond: u32) -> CtuResult<Self> {
        let check = |field, value: u32, max: u32| {
            if value > max {
                Err(CtuError::WallClockOutOfRange { field, value, max })
            } else {
                Ok(())
            }
        };
        check("hour", hour as u32, 23)?;
        check("minute", minute as u32, 59)?;
        check("second", second as u32, 59)?;
        check("microsecond", microsecond, 999_999)?;
        Ok(Self {
            hour,
            minute,
            second,
            microsecond,
        })
    }

    /// Build a dial value from seconds past CTU midnight.
    ///
    /// The input is rounded to the nearest microsecond and wrapped onto
    /// the dial; a rounded value of exactly 1 000 000 µs carries into
    /// seconds, minutes and hours, with hour 23 wrapping to 0. The
    /// microsecond field of the result is therefore always < 1 000 000.
    pub(crate) fn from_dial_seconds(dial_seconds: f64) -> Self {
        let micros = (dial_seconds * 1e6).round() as i64;
        let micros = micros.rem_euclid(DIAL_MICROS);
        let (secs, microsecond) = (micros / 1_000_000, (micros % 1_000_000) as u32);
        Self {
            hour: (secs / 3600) as u8,
            minute: ((secs % 3600) / 60) as u8,
            second: (secs % 60) as u8,
            microsecond,
        }
    }

    /// Hour on the dial, `0..=23`.
    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, `0..=59`.
    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second, `0..=59`.
    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Microsecond, `0..=999999`.
    #[inline]
    pub const fn microsecond(&self) -> u32 {
        self.microsecond
    }

    /// Seconds past CTU midnight, including the fractional component.
    #[inline]
    pub fn dial_seconds(&self) -> f64 {
        self.hour as f64 * 3600.0
            + self.minute as f64 * 60.0
            + self.second as f64
            + self.microsecond as f64 / 1e6
    }
}

impl std::fmt::Display for CtuWallClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:06}",
            self.hour, self.minute, self.second, self.microsecond
        )
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────
//
// Deserialization routes through `new()` so invalid fields are rejected
// rather than smuggled into a value the rest of the crate trusts.

#[cfg(feature = "serde")]
impl Serialize for CtuWallClock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("CtuWallClock", 4)?;
        s.serialize_field("hour", &self.hour)?;
        s.serialize_field("minute", &self.minute)?;
        s.serialize_field("second", &self.second)?;
        s.serialize_field("microsecond", &self.microsecond)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CtuWallClock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            hour: u8,
            minute: u8,
            second: u8,
            microsecond: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        CtuWallClock::new(raw.hour, raw.minute, raw.second, raw.microsecond)
            .map_err(serde::de::Error::custom)
    }
}
