//! Seeded sample dataset for the mock transactions gateway.

use crate::infrastructure::dto::{
    PaymentMethodDto, TransactionDetailsDto, TransactionStatusDto, TransactionSummaryDto,
};
use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::json;

pub const DEFAULT_SEED: u64 = 20260216;
pub const DEFAULT_TOTAL: usize = 160;

const MERCHANTS: [&str; 5] = [
    "Atlas Market",
    "Urban Books",
    "Nova Health",
    "Summit Travel",
    "Pixel Lab",
];

const CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

const FAILURES: [(&str, &str); 4] = [
    ("CARD_DECLINED", "Card issuer declined the transaction."),
    ("INSUFFICIENT_FUNDS", "Not enough balance on payment instrument."),
    ("FRAUD_REVIEW", "Gateway flagged the transaction for manual review."),
    ("NETWORK_TIMEOUT", "Acquirer timeout while confirming payment."),
];

/// Spread of generated timestamps, going back from `now`.
const CREATED_WINDOW_HOURS: f64 = 96.0;

fn pick_status(rng: &mut StdRng) -> TransactionStatusDto {
    let roll = rng.gen_range(0.0..1.0);
    if roll < 0.58 {
        TransactionStatusDto::Success
    } else if roll < 0.80 {
        TransactionStatusDto::Pending
    } else {
        TransactionStatusDto::Failed
    }
}

fn pick_payment_method(rng: &mut StdRng, status: TransactionStatusDto) -> PaymentMethodDto {
    // Pending rows are always bank transfers; settled rows split card/wallet.
    if status == TransactionStatusDto::Pending {
        PaymentMethodDto::BankTransfer
    } else if rng.gen_range(0.0..1.0) > 0.55 {
        PaymentMethodDto::Card
    } else {
        PaymentMethodDto::Wallet
    }
}

/// Generates `total` transactions with ids `txn_0001..`, spread over the
/// [`CREATED_WINDOW_HOURS`] preceding `now`. Rows are produced in id order;
/// callers sort by timestamp per query.
pub fn sample_transactions(
    rng: &mut StdRng,
    total: usize,
    now: DateTime<Utc>,
) -> Vec<TransactionDetailsDto> {
    (0..total)
        .map(|index| {
            let status = pick_status(rng);
            let amount_cents = (rng.gen_range(20.0..1220.0) * 100.0) as i64;
            let age_ms = rng.gen_range(0.0..CREATED_WINDOW_HOURS * 3_600_000.0) as i64;
            let currency = CURRENCIES[rng.gen_range(0..CURRENCIES.len())];
            let merchant = MERCHANTS[rng.gen_range(0..MERCHANTS.len())];
            let payment_method = pick_payment_method(rng, status);
            let failure = (status == TransactionStatusDto::Failed)
                .then(|| FAILURES[rng.gen_range(0..FAILURES.len())]);

            TransactionDetailsDto {
                summary: TransactionSummaryDto {
                    id: format!("txn_{:04}", index + 1),
                    reference: format!("PAY-{}", 100_000 + index),
                    amount_cents,
                    currency: currency.to_string(),
                    status,
                    created_at: now - TimeDelta::milliseconds(age_ms),
                    customer_email: format!("customer{}@example.com", (index % 24) + 1),
                },
                gateway_trace_id: format!("gw_{}", rng.gen_range(100_000..1_000_000)),
                payment_method,
                failure_code: failure.map(|(code, _)| code.to_string()),
                failure_reason: failure.map(|(_, reason)| reason.to_string()),
                raw_payload: json!({
                    "merchant": merchant,
                    "source": "payment-console-mock",
                    "retries": rng.gen_range(0..3),
                    "processingNode": format!("node-{}", rng.gen_range(1..=5)),
                }),
            }
        })
        .collect()
}
