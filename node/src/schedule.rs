// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::orchestrator::AuditOrchestrator;

/// Top of every hour, UTC.
pub const CRON_EXPRESSION: &str = "0 * * * *";

#[derive(Debug, Clone, Copy, Default)]
pub struct HourlySchedule;

impl HourlySchedule {
    /// First minute-0 instant strictly after `t`.
    pub fn next_after(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let next_hour = (t.timestamp().div_euclid(3600) + 1) * 3600;
        DateTime::from_timestamp(next_hour, 0).unwrap_or_else(|| t + Duration::hours(1))
    }
}

/// Runs ticks on the hourly schedule until `shutdown` resolves.
///
/// Ticks never overlap within this loop: the next wait starts after the
/// previous tick returns. A failed tick is logged and the loop continues.
pub async fn run_schedule<S>(orchestrator: Arc<AuditOrchestrator>, clock: Arc<dyn Clock>, shutdown: S)
where
    S: Future<Output = ()>,
{
    let schedule = HourlySchedule;
    tokio::pin!(shutdown);

    loop {
        let now = clock.now();
        let next = schedule.next_after(now);
        let wait = (next - now).to_std().unwrap_or_default();
        tracing::info!("Next audit at {} (in {:?}, schedule `{}`)", next.to_rfc3339(), wait, CRON_EXPRESSION);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = &mut shutdown => {
                tracing::info!("Scheduler stopping");
                return;
            }
        }

        match orchestrator.run_tick().await {
            Ok(report) => tracing::info!(
                status = report.audit.status.as_str(),
                decision = ?report.decision,
                "Scheduled audit complete"
            ),
            Err(e) => tracing::error!(kind = e.kind(), "Scheduled audit failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_after_mid_hour() {
        let t = Utc.with_ymd_and_hms(2026, 5, 4, 10, 17, 42).unwrap();
        assert_eq!(HourlySchedule.next_after(t), Utc.with_ymd_and_hms(2026, 5, 4, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_next_after_is_strict() {
        let t = Utc.with_ymd_and_hms(2026, 5, 4, 11, 0, 0).unwrap();
        assert_eq!(HourlySchedule.next_after(t), Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_rolls_over_midnight() {
        let t = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(HourlySchedule.next_after(t), Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }
}
