
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use super::clock::ManualClock;

pub(super) fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 29, 13, 0, 0).unwrap()
}

pub(super) fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start()))
}
