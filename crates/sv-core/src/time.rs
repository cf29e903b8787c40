//! Timestamps and the smallest time step used between adjacent periods.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use crate::{CoreError, CoreResult, numeric::ensure_finite};

/// Instant type used for every sample and period boundary.
pub type Timestamp = DateTime<Utc>;

/// Gap left between the end of one period and the start of the next.
///
/// Defaults to one second, the resolution of the stand's time-series store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStep(TimeDelta);

impl TimeStep {
    /// Create a step from a positive duration.
    pub fn new(delta: TimeDelta) -> CoreResult<Self> {
        if delta <= TimeDelta::zero() {
            return Err(CoreError::InvalidArg {
                what: "time step must be positive",
            });
        }
        Ok(Self(delta))
    }

    /// Create a step from seconds, rounded to whole milliseconds.
    pub fn from_secs_f64(secs: f64) -> CoreResult<Self> {
        let secs = ensure_finite(secs, "time step")?;
        let millis = (secs * 1000.0).round();
        let delta = TimeDelta::try_milliseconds(millis as i64).ok_or(CoreError::InvalidArg {
            what: "time step out of range",
        })?;
        Self::new(delta)
    }

    pub fn delta(self) -> TimeDelta {
        self.0
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        Self(TimeDelta::seconds(1))
    }
}

/// Parse the timestamp formats the stand's services emit.
///
/// Accepts RFC 3339 (`2021-01-02T08:00:00.000+00:00`), naive ISO 8601
/// (`2021-01-02T08:00:00`, read as UTC), and bare dates (`2021-01-31`,
/// read as UTC midnight).
pub fn parse_timestamp(input: &str) -> CoreResult<Timestamp> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }
    Err(CoreError::Parse {
        what: "timestamp",
        input: input.to_string(),
    })
}
