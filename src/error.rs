// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for CTU conversions.
//!
//! Every failure is a deterministic function of the inputs, so errors are
//! surfaced immediately to the caller; there is no retry or recovery path.
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`WallClockOutOfRange`](CtuError::WallClockOutOfRange) | A dial field exceeds its legal range |
//! | [`DateOutOfRange`](CtuError::DateOutOfRange) | Calendar/instant arithmetic left chrono's range |
//! | [`DegenerateDay`](CtuError::DegenerateDay) | The elastic hour collapsed to a non-positive span |

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type CtuResult<T> = Result<T, CtuError>;

/// Unified error type for CTU timekeeping operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CtuError {
    /// A CTU wall-clock field was supplied outside its legal range
    /// (hour > 23, minute/second > 59, microsecond ≥ 1 000 000).
    #[error("wall-clock {field} {value} is outside the legal range 0..={max}")]
    WallClockOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// Date or instant arithmetic left the representable calendar range.
    #[error("calendar arithmetic around {date} left the representable range")]
    DateOutOfRange { date: NaiveDate },

    /// The midnight drift is ≤ −3600 s, leaving the elastic hour with a
    /// non-positive real-world span. The mapping is ill-posed for such a
    /// day; unreachable for terrestrial longitudes but reported rather
    /// than divided through.
    #[error("elastic hour span is non-positive (midnight drift {drift_seconds} s)")]
    DegenerateDay { drift_seconds: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_field() {
        let err = CtuError::WallClockOutOfRange {
            field: "minute",
            value: 71,
            max: 59,
        };
        let msg = format!("{err}");
        assert!(msg.contains("minute"));
        assert!(msg.contains("71"));
        assert!(msg.contains("59"));
    }

    #[test]
    fn degenerate_day_reports_drift() {
        let err = CtuError::DegenerateDay {
            drift_seconds: -4000.0,
        };
        assert!(format!("{err}").contains("-4000"));
    }
}
