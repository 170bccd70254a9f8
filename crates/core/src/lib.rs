//! # Agendei Core
//!
//! Domain types and pure booking logic for the Agendei appointment service.
//! This crate is free of I/O: the availability engine and all validation
//! rules are synchronous functions over plain data, so they can be exercised
//! directly in tests and reused by any server or worker binary.

/// Domain error types shared across crates
pub mod errors;
/// Request/response and entity models
pub mod models;

/// The slot-availability engine
pub mod availability;
