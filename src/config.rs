// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants.

/// Key of the axiom configuration document in the `systemConfig` collection.
pub const CONFIG_KEY: &str = "core_axioms";

/// Identifier of the singleton record in the `governanceProtocols` collection.
pub const PROTOCOL_ID: &str = "core";

/// Solidity signature of the anchor getter on the ledger contract.
pub const ANCHOR_FUNCTION_SIGNATURE: &str = "CORE_AXIOM_HASH()";

/// Scores strictly above this value are reported as drift.
pub const DEFAULT_DIVERGENCE_THRESHOLD: f64 = 0.005;

pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub const DEFAULT_RETRY_BASE_MS: u64 = 1_000;

/// One hour.
pub const DEFAULT_ALERT_COOLDOWN_MS: u64 = 3_600_000;

/// Logical collection names of the document store.
pub mod collections {
    pub const SYSTEM_CONFIG: &str = "systemConfig";
    pub const ALERTS: &str = "alerts";
    pub const GOVERNANCE_PROTOCOLS: &str = "governanceProtocols";
    pub const AUDIT_HISTORY: &str = "auditHistory";
    pub const SYSTEM_ERRORS: &str = "systemErrors";
}
