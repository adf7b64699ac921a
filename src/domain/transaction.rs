use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    Wallet,
}

/// One row of the transactions list.
///
/// Read-only value object returned by the gateway; the engine stores and
/// replaces these wholesale, never mutating them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionSummary {
    pub id: String,
    pub reference: String,
    /// Amount in major currency units (e.g. dollars), mapped from cents.
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub customer_email: String,
}

/// Full drill-down view of a single transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionDetails {
    pub summary: TransactionSummary,
    pub gateway_trace_id: String,
    pub payment_method: PaymentMethod,
    pub failure_code: Option<String>,
    pub failure_reason: Option<String>,
    pub raw_payload: serde_json::Value,
}
