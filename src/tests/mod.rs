// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod determinism_tests;
pub mod divergence_tests;
pub mod proof_tests;
