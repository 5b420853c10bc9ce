// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_kernel::cooldown::CooldownWindow;
use axiom_kernel::records::AlertKind;
use chrono::{DateTime, Utc};

use crate::store::{DocumentStore, StoreResult};

/// Storage-backed alert de-duplication.
///
/// Suppresses a new `CORE_DRIFT` alert while any stored one is younger than the
/// cooldown. All state lives in the store, so restarts and overlapping ticks see
/// the same answer.
#[derive(Debug, Clone, Copy)]
pub struct AlertCircuitBreaker {
    window: CooldownWindow,
}

impl AlertCircuitBreaker {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            window: CooldownWindow::from_millis(cooldown_ms),
        }
    }

    pub async fn should_suppress(&self, store: &dyn DocumentStore, now: DateTime<Utc>) -> StoreResult<bool> {
        let since = self.window.window_start(now);
        let recent = store.recent_alerts(AlertKind::CoreDrift, since).await?;
        Ok(self.window.suppresses(now, AlertKind::CoreDrift, &recent))
    }
}
