//! Infrastructure adapters implementing the domain ports.
//!
//! The only backend shipped today is [`mock::MockGateway`], an in-process
//! stand-in for the transactions API that serves seeded fixture data with
//! configurable latency and failure injection.

pub mod dto;
pub mod fixtures;
pub mod mock;
