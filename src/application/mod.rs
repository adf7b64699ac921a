//! Application layer containing the query orchestration core.
//!
//! This module defines the `ConsoleEngine` which acts as the primary entry
//! point for browsing transactions. It turns user-driven state changes into
//! sequenced, logically cancellable gateway fetches and publishes the
//! resulting loading/data/error states through `tokio` watch channels.

pub mod engine;
pub mod slot;
