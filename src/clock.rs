use chrono::{DateTime, Utc};

/// Source of the `date` stamp put on new funders.
pub trait Clock: Send + Sync {
    fn now(&self) -> String;
}

/// Wall clock in UTC, e.g. `2022-02-17 18:21:41.64419 +0000 UTC`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        format_timestamp(Utc::now())
    }
}

/// Always returns the same stamp.
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(stamp: impl Into<String>) -> Self {
        Self(stamp.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

/// Fractional seconds keep only significant digits and are dropped entirely
/// when zero.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    let base = at.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = at.timestamp_subsec_nanos();

    if nanos == 0 {
        return format!("{} +0000 UTC", base);
    }

    let fraction = format!("{:09}", nanos);
    format!("{}.{} +0000 UTC", base, fraction.trim_end_matches('0'))
}
