//! Domain model: query parameters, transaction value objects, and the
//! gateway port the orchestration engine depends on.

pub mod ports;
pub mod query;
pub mod transaction;
