// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// The axiom configuration record is missing or has the wrong shape.
    #[error("Invalid axiom configuration: {0}")]
    InvalidConfiguration(String),

    /// A weight cannot be rendered canonically (NaN or infinite).
    #[error("Weight at index {index} is not a finite number")]
    NonFiniteWeight { index: usize },

    /// A hex digest did not decode to the expected length.
    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    /// A contract address is not `0x` followed by 40 hex digits.
    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),

    /// An `eth_call` return payload could not be decoded.
    #[error("Invalid call result: {0}")]
    InvalidCallResult(String),
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
