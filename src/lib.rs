// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! axiom-kernel: deterministic core of the Proof-of-Divergence auditor.
//!
//! Everything in this crate is pure: fingerprinting of the axiom configuration,
//! ledger ABI helpers, divergence scoring, the alert cooldown predicate, retry
//! policy values and the record types persisted by the node. No I/O happens here.

pub mod config;
pub mod error;
pub mod axioms;
pub mod canonical;
pub mod fingerprint;
pub mod abi;
pub mod divergence;
pub mod cooldown;
pub mod retry;
pub mod records;
pub mod proof;

pub use axioms::AxiomConfiguration;
pub use divergence::{AuditStatus, Divergence, DivergenceEvaluator};
pub use error::{KernelError, KernelResult};
pub use fingerprint::{compute_fingerprint, Fingerprint};
pub use retry::{RetryOutcome, RetryPolicy};

#[cfg(test)]
mod tests;
