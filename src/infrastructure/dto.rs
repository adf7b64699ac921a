//! Wire-format DTOs for the transactions API and their domain mappings.
//!
//! The wire shape uses camelCase fields, SCREAMING_SNAKE_CASE enums, integer
//! cent amounts and ISO-8601 timestamps; the domain model is the lowercase,
//! `Decimal`-amount view of the same data.

use crate::domain::transaction::{
    PaymentMethod, TransactionDetails, TransactionStatus, TransactionSummary,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatusDto {
    Pending,
    Success,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodDto {
    Card,
    BankTransfer,
    Wallet,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummaryDto {
    pub id: String,
    pub reference: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: TransactionStatusDto,
    pub created_at: DateTime<Utc>,
    pub customer_email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailsDto {
    #[serde(flatten)]
    pub summary: TransactionSummaryDto,
    pub gateway_trace_id: String,
    pub payment_method: PaymentMethodDto,
    pub failure_code: Option<String>,
    pub failure_reason: Option<String>,
    pub raw_payload: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListResponseDto {
    pub items: Vec<TransactionSummaryDto>,
    pub total: usize,
}

impl From<TransactionStatusDto> for TransactionStatus {
    fn from(status: TransactionStatusDto) -> Self {
        match status {
            TransactionStatusDto::Pending => TransactionStatus::Pending,
            TransactionStatusDto::Success => TransactionStatus::Success,
            TransactionStatusDto::Failed => TransactionStatus::Failed,
        }
    }
}

impl From<PaymentMethodDto> for PaymentMethod {
    fn from(method: PaymentMethodDto) -> Self {
        match method {
            PaymentMethodDto::Card => PaymentMethod::Card,
            PaymentMethodDto::BankTransfer => PaymentMethod::BankTransfer,
            PaymentMethodDto::Wallet => PaymentMethod::Wallet,
        }
    }
}

impl From<TransactionSummaryDto> for TransactionSummary {
    fn from(dto: TransactionSummaryDto) -> Self {
        TransactionSummary {
            id: dto.id,
            reference: dto.reference,
            // Cent amounts on the wire become major units in the domain.
            amount: Decimal::new(dto.amount_cents, 2),
            currency: dto.currency,
            status: dto.status.into(),
            created_at: dto.created_at,
            customer_email: dto.customer_email,
        }
    }
}

impl From<TransactionDetailsDto> for TransactionDetails {
    fn from(dto: TransactionDetailsDto) -> Self {
        TransactionDetails {
            summary: dto.summary.into(),
            gateway_trace_id: dto.gateway_trace_id,
            payment_method: dto.payment_method.into(),
            failure_code: dto.failure_code,
            failure_reason: dto.failure_reason,
            raw_payload: dto.raw_payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_summary_dto() -> TransactionSummaryDto {
        TransactionSummaryDto {
            id: "txn_0001".to_string(),
            reference: "PAY-100000".to_string(),
            amount_cents: 24050,
            currency: "USD".to_string(),
            status: TransactionStatusDto::Failed,
            created_at: "2026-02-16T08:30:00Z".parse().unwrap(),
            customer_email: "customer1@example.com".to_string(),
        }
    }

    #[test]
    fn test_summary_dto_wire_shape() {
        let json = serde_json::to_value(sample_summary_dto()).unwrap();
        assert_eq!(json["amountCents"], 24050);
        assert_eq!(json["status"], "FAILED");
        assert_eq!(json["customerEmail"], "customer1@example.com");
        assert_eq!(json["createdAt"], "2026-02-16T08:30:00Z");
    }

    #[test]
    fn test_list_response_dto_wire_shape() {
        let response = ListResponseDto {
            items: vec![sample_summary_dto()],
            total: 1,
        };

        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["items"][0]["id"], "txn_0001");
        assert_eq!(json["items"][0]["amountCents"], 24050);
    }

    #[test]
    fn test_details_dto_flattens_summary_fields() {
        let raw = serde_json::json!({
            "id": "txn_0002",
            "reference": "PAY-100001",
            "amountCents": 1999,
            "currency": "EUR",
            "status": "PENDING",
            "createdAt": "2026-02-15T10:00:00Z",
            "customerEmail": "customer2@example.com",
            "gatewayTraceId": "gw_345678",
            "paymentMethod": "BANK_TRANSFER",
            "failureCode": null,
            "failureReason": null,
            "rawPayload": { "merchant": "Atlas Market" }
        });

        let dto: TransactionDetailsDto = serde_json::from_value(raw).unwrap();
        assert_eq!(dto.summary.id, "txn_0002");
        assert_eq!(dto.payment_method, PaymentMethodDto::BankTransfer);
        assert_eq!(dto.raw_payload["merchant"], "Atlas Market");
    }

    #[test]
    fn test_summary_mapping_converts_cents() {
        let summary: TransactionSummary = sample_summary_dto().into();
        assert_eq!(summary.amount, dec!(240.50));
        assert_eq!(summary.status, TransactionStatus::Failed);
    }

    #[test]
    fn test_details_mapping_carries_failure_fields() {
        let dto = TransactionDetailsDto {
            summary: sample_summary_dto(),
            gateway_trace_id: "gw_123456".to_string(),
            payment_method: PaymentMethodDto::Card,
            failure_code: Some("CARD_DECLINED".to_string()),
            failure_reason: Some("Card issuer declined the transaction.".to_string()),
            raw_payload: serde_json::json!({ "retries": 1 }),
        };

        let details: TransactionDetails = dto.into();
        assert_eq!(details.payment_method, PaymentMethod::Card);
        assert_eq!(details.failure_code.as_deref(), Some("CARD_DECLINED"));
        assert_eq!(details.raw_payload["retries"], 1);
    }
}
