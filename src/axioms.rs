// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The governance axiom configuration as read from the document store.

use serde_json::Value;

use crate::error::{KernelError, KernelResult};

/// Ordered weight vector that the ledger anchor commits to.
///
/// Order is significant: `[1, 2]` and `[2, 1]` are different configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct AxiomConfiguration {
    weights: Vec<f64>,
}

impl AxiomConfiguration {
    /// Builds a configuration directly from weights.
    ///
    /// Fails if the vector is empty or any weight is NaN/infinite, since such
    /// values have no canonical decimal form.
    pub fn new(weights: Vec<f64>) -> KernelResult<Self> {
        if weights.is_empty() {
            return Err(KernelError::InvalidConfiguration("weights must not be empty".into()));
        }
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(KernelError::NonFiniteWeight { index });
        }
        Ok(Self { weights })
    }

    /// Extracts the configuration from a `systemConfig` document.
    ///
    /// `None` means the document does not exist. The document must carry a
    /// `weights` field holding a non-empty array of numbers; other fields are ignored.
    pub fn from_document(document: Option<&Value>) -> KernelResult<Self> {
        let document = document
            .ok_or_else(|| KernelError::InvalidConfiguration("configuration record not found".into()))?;

        let weights = match document.get("weights") {
            None | Some(Value::Null) => {
                return Err(KernelError::InvalidConfiguration("weights field is missing".into()))
            }
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(KernelError::InvalidConfiguration(format!(
                    "weights must be an array, found {}",
                    json_kind(other)
                )))
            }
        };

        let parsed = weights
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_f64().ok_or_else(|| {
                    KernelError::InvalidConfiguration(format!(
                        "weight at index {} must be a number, found {}",
                        i,
                        json_kind(item)
                    ))
                })
            })
            .collect::<KernelResult<Vec<f64>>>()?;

        Self::new(parsed)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
