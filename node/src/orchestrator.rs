// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! One audit tick, end to end.
//!
//! Steps run strictly in sequence:
//! `Idle → ComputingLocalHash → FetchingAnchor → Evaluating → Recording →
//! (Suppressed | Alerting | NoAlertNeeded) → Idle`, with `Failed` reachable from
//! every step. A failed tick leaves one `systemErrors` entry behind (best effort)
//! and the error is returned to the caller unchanged. A panic inside a step is
//! caught at the tick boundary and handled as an `UnexpectedError`.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};

use futures::FutureExt;

use axiom_kernel::config::{CONFIG_KEY, PROTOCOL_ID};
use axiom_kernel::records::{AlertRecord, AuditRecord, ErrorRecord};
use axiom_kernel::{compute_fingerprint, AuditStatus, AxiomConfiguration, DivergenceEvaluator};
use serde::Serialize;

use crate::alerts::{AlertDispatcher, Notifier};
use crate::anchor::AnchorReader;
use crate::breaker::AlertCircuitBreaker;
use crate::clock::Clock;
use crate::config::NodeConfig;
use crate::errors::AuditError;
use crate::network::LedgerClient;
use crate::recorder::AuditRecorder;
use crate::store::SharedStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TickState {
    Idle,
    ComputingLocalHash,
    FetchingAnchor,
    Evaluating,
    Recording,
    Suppressed,
    Alerting,
    NoAlertNeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertDecision {
    NoAlertNeeded,
    Suppressed,
    Alerted,
}

/// What a successful tick did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub audit: AuditRecord,
    pub decision: AlertDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertRecord>,
}

pub struct AuditOrchestrator {
    store: SharedStore,
    clock: Arc<dyn Clock>,
    anchor: AnchorReader,
    evaluator: DivergenceEvaluator,
    breaker: AlertCircuitBreaker,
    dispatcher: AlertDispatcher,
    recorder: AuditRecorder,
    rpc_url: String,
    contract_address: String,
    tick_budget: Duration,
}

impl AuditOrchestrator {
    pub fn new(
        cfg: &NodeConfig,
        store: SharedStore,
        ledger: Arc<dyn LedgerClient>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        install_panic_capture();
        Self {
            store,
            clock,
            anchor: AnchorReader::new(ledger, cfg.retry_policy()),
            evaluator: DivergenceEvaluator::new(cfg.divergence_threshold),
            breaker: AlertCircuitBreaker::new(cfg.alert_cooldown_ms),
            dispatcher: AlertDispatcher::new(PROTOCOL_ID, notifier),
            recorder: AuditRecorder,
            rpc_url: cfg.rpc_url.clone(),
            contract_address: cfg.contract_address.clone(),
            tick_budget: cfg.tick_budget,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Runs one tick within the configured time budget.
    pub async fn run_tick(&self) -> Result<TickReport, AuditError> {
        let started = Instant::now();
        let mut state = TickState::Idle;

        let guarded = AssertUnwindSafe(self.execute(&mut state)).catch_unwind();
        let (result, stack) = match tokio::time::timeout(self.tick_budget, guarded).await {
            Ok(Ok(result)) => (result, None),
            Ok(Err(payload)) => {
                let stack = take_panic_trace();
                let message = format!("tick panicked: {}", panic_message(payload.as_ref()));
                (Err(AuditError::Unexpected(message)), stack)
            }
            Err(_) => (
                Err(AuditError::Unexpected(format!(
                    "tick exceeded its budget of {}s",
                    self.tick_budget.as_secs()
                ))),
                None,
            ),
        };

        metrics::histogram!("axiom_audit_duration_seconds", started.elapsed().as_secs_f64());

        match result {
            Ok(report) => {
                metrics::increment_counter!("axiom_audits_total");
                tracing::debug!("Tick: {:?} -> Idle", state);
                Ok(report)
            }
            Err(e) => {
                metrics::increment_counter!("axiom_audit_failures_total");
                tracing::error!(kind = e.kind(), "Tick failed while {:?}: {}", state, e);
                transition(&mut state, TickState::Failed);
                self.record_failure(&e, stack).await;
                Err(e)
            }
        }
    }

    async fn execute(&self, state: &mut TickState) -> Result<TickReport, AuditError> {
        let store = self.store.as_ref();

        transition(state, TickState::ComputingLocalHash);
        let document = store.read_config(CONFIG_KEY).await?;
        let config = AxiomConfiguration::from_document(document.as_ref())?;
        let local_hash = compute_fingerprint(&config).to_hex();

        transition(state, TickState::FetchingAnchor);
        let anchored_hash = self
            .anchor
            .read(&self.rpc_url, &self.contract_address)
            .await?
            .to_hex();

        transition(state, TickState::Evaluating);
        let divergence = self.evaluator.evaluate(&local_hash, &anchored_hash);

        transition(state, TickState::Recording);
        let audit = AuditRecord::new(self.clock.now(), local_hash, anchored_hash, &divergence);
        self.recorder.record(store, &audit).await?;

        if divergence.status == AuditStatus::Ok {
            transition(state, TickState::NoAlertNeeded);
            return Ok(TickReport {
                audit,
                decision: AlertDecision::NoAlertNeeded,
                alert: None,
            });
        }

        metrics::increment_counter!("axiom_drift_detected_total");
        tracing::warn!(
            score = divergence.score,
            "Drift detected: local {} vs anchor {}",
            audit.local_hash,
            audit.anchored_hash
        );

        if self.breaker.should_suppress(store, audit.timestamp).await? {
            transition(state, TickState::Suppressed);
            metrics::increment_counter!("axiom_alerts_suppressed_total");
            tracing::info!("Alert suppressed: a CORE_DRIFT alert was raised within the cooldown window");
            return Ok(TickReport {
                audit,
                decision: AlertDecision::Suppressed,
                alert: None,
            });
        }

        transition(state, TickState::Alerting);
        let alert = self.dispatcher.dispatch(store, &audit).await?;
        Ok(TickReport {
            audit,
            decision: AlertDecision::Alerted,
            alert: Some(alert),
        })
    }

    /// `stack` is only known for panics; other failures carry their cause in the message.
    async fn record_failure(&self, error: &AuditError, stack: Option<String>) {
        let record = ErrorRecord::audit_failure(self.clock.now(), error.to_string(), stack);

        if let Err(e) = self.store.append_error(&record).await {
            tracing::error!("Failed to persist error record ({}): {}", error, e);
        }
    }
}

fn transition(state: &mut TickState, next: TickState) {
    tracing::debug!("Tick: {:?} -> {:?}", state, next);
    *state = next;
}

thread_local! {
    static PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chains a panic hook that keeps the panicking thread's backtrace for the
/// tick's error record.
fn install_panic_capture() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let trace = format!("{}\n{}", info, Backtrace::force_capture());
            PANIC_TRACE.with(|slot| *slot.borrow_mut() = Some(trace));
            previous(info);
        }));
    });
}

fn take_panic_trace() -> Option<String> {
    PANIC_TRACE.with(|slot| slot.borrow_mut().take())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
