// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! File-backed document store for the axiom auditor.
//!
//! Append-only collections live in CRC64-framed logs (`wal`), singleton
//! documents in checksummed files replaced atomically (`document`). `store`
//! ties both together under one root directory.

pub mod error;
pub mod document;
pub mod wal;
pub mod store;
pub mod fixtures;

pub use error::{PersistenceError, Result};
pub use store::{FileStore, LogReport, Stored};
