// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod store;
pub mod network;
pub mod clock;
pub mod anchor;
pub mod breaker;
pub mod alerts;
pub mod recorder;
pub mod orchestrator;
pub mod schedule;
pub mod api;
pub mod server;
