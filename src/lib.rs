//! `LeadStake` - client-side investor allocation management for vehicle
//! purchase leads.
//!
//! This crate owns the editable allocation list for one purchase lead, the
//! save-time validation rules, a debounced auto-save state machine that
//! coalesces rapid edits into one PUT, and the reconciliation of the
//! backend's canonical response back into local state. The backend REST
//! service is the source of truth for every business rule; everything here is
//! advisory orchestration on the client side.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
    clippy::cast_possible_truncation,  // Display formatting of whole percentages
)]

/// REST client for the purchases backend
pub mod api;
/// Configuration loading from config.toml and the environment
pub mod config;
/// Core allocation logic - store, validator, reconciler, funding stats
pub mod core;
/// Unified error types and result handling
pub mod errors;
/// Wire records for the backend REST contract
pub mod models;
/// Allocation session with debounced auto-save
pub mod session;

#[cfg(test)]
pub mod test_utils;
