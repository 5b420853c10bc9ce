// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axiom_kernel::records::AuditRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUDIT_LIMIT: usize = 24;
pub const MAX_AUDIT_LIMIT: usize = 500;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AuditsQuery {
    pub limit: Option<usize>,
}

impl AuditsQuery {
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_AUDIT_LIMIT).clamp(1, MAX_AUDIT_LIMIT)
    }
}

#[derive(Serialize, Deserialize)]
pub struct AuditsResponse {
    pub audits: Vec<AuditRecord>,
}
