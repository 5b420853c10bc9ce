// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Alert cooldown window.
//!
//! The breaker is a predicate over "now" and the alerts already stored; it keeps
//! no in-process state, so it behaves the same across restarts and across
//! overlapping ticks.

use chrono::{DateTime, Duration, Utc};

use crate::records::{AlertKind, AlertRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownWindow {
    cooldown_ms: u64,
}

impl CooldownWindow {
    pub fn from_millis(cooldown_ms: u64) -> Self {
        Self { cooldown_ms }
    }

    /// Alerts strictly after this instant are inside the window.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let span = Duration::milliseconds(i64::try_from(self.cooldown_ms).unwrap_or(i64::MAX));
        now.checked_sub_signed(span).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn contains(&self, now: DateTime<Utc>, timestamp: DateTime<Utc>) -> bool {
        timestamp > self.window_start(now)
    }

    /// True when at least one `kind` alert falls inside the window.
    pub fn suppresses<'a>(
        &self,
        now: DateTime<Utc>,
        kind: AlertKind,
        alerts: impl IntoIterator<Item = &'a AlertRecord>,
    ) -> bool {
        alerts
            .into_iter()
            .any(|a| a.kind == kind && self.contains(now, a.timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_window_is_exclusive_at_start() {
        let w = CooldownWindow::from_millis(3_600_000);
        let now = at(3600);
        assert_eq!(w.window_start(now), at(0));
        assert!(!w.contains(now, at(0)));
        assert!(w.contains(now, at(1)));
    }

    #[test]
    fn test_huge_cooldown_saturates() {
        let w = CooldownWindow::from_millis(u64::MAX);
        assert!(w.contains(at(0), at(-1_000_000)));
    }
}
