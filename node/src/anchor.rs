// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Resilient retrieval of the ledger anchor.

use std::sync::Arc;

use axiom_kernel::abi::validate_address;
use axiom_kernel::{Fingerprint, RetryOutcome, RetryPolicy};

use crate::errors::AuditError;
use crate::network::{LedgerClient, LedgerError};

pub struct AnchorReader {
    client: Arc<dyn LedgerClient>,
    policy: RetryPolicy,
}

impl AnchorReader {
    pub fn new(client: Arc<dyn LedgerClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Calls the ledger until it answers or the policy runs out.
    ///
    /// The first attempt always happens; after a failed attempt `i` the reader
    /// sleeps `policy.delay_after(i)` unless that was the last attempt.
    pub async fn fetch_with_retry(&self, rpc_url: &str, contract: &str) -> RetryOutcome<Fingerprint, LedgerError> {
        let mut attempt: u32 = 0;
        loop {
            match self.client.read_anchor_hash(rpc_url, contract).await {
                Ok(value) => {
                    return RetryOutcome::Succeeded {
                        value,
                        attempts: attempt + 1,
                    }
                }
                Err(e) => {
                    metrics::increment_counter!("axiom_anchor_attempt_failures_total");
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.policy.max_attempts,
                        "Anchor read attempt failed: {}",
                        e
                    );
                    match self.policy.delay_after(attempt) {
                        Some(delay) => {
                            tracing::debug!("Retrying anchor read in {:?}", delay);
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            return RetryOutcome::Exhausted {
                                attempts: attempt + 1,
                                last_error: e,
                            }
                        }
                    }
                }
            }
            attempt += 1;
        }
    }

    /// Reads the anchored fingerprint.
    ///
    /// Missing or malformed endpoint/address settings fail immediately, without
    /// touching the network.
    pub async fn read(&self, rpc_url: &str, contract: &str) -> Result<Fingerprint, AuditError> {
        if rpc_url.trim().is_empty() {
            return Err(AuditError::Configuration("RPC endpoint URL is not configured".into()));
        }
        if contract.trim().is_empty() {
            return Err(AuditError::Configuration("anchor contract address is not configured".into()));
        }
        validate_address(contract.trim())?;

        match self.fetch_with_retry(rpc_url.trim(), contract.trim()).await {
            RetryOutcome::Succeeded { value, attempts } => {
                tracing::debug!(attempts, "Anchor read: {}", value);
                Ok(value)
            }
            RetryOutcome::Exhausted { attempts, last_error } => Err(AuditError::Network {
                attempts,
                message: last_error.to_string(),
            }),
        }
    }
}
