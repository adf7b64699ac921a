use super::query::TransactionsQuery;
use super::transaction::{TransactionDetails, TransactionSummary};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure surfaced by the transactions gateway.
///
/// The engine stores `message` verbatim in the slot's error field and does
/// not branch on `status_code`; it is carried for logging and diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
    pub status_code: u16,
}

impl GatewayError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[async_trait]
pub trait TransactionsGateway: Send + Sync {
    async fn fetch_list(&self, query: &TransactionsQuery)
    -> GatewayResult<Vec<TransactionSummary>>;
    async fn fetch_details(&self, id: &str) -> GatewayResult<TransactionDetails>;
}

pub type SharedGateway = Arc<dyn TransactionsGateway>;
