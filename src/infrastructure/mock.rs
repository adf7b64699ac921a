//! In-process mock of the transactions backend.
//!
//! Serves a seeded fixture dataset through [`TransactionsGateway`] while
//! simulating the unpleasant parts of a real network: randomized latency and
//! intermittent 500s on both endpoints. Filtering, searching and sorting
//! happen here, server-side, exactly once per call.

use crate::domain::ports::{GatewayError, GatewayResult, TransactionsGateway};
use crate::domain::query::{SortOrder, StatusFilter, TransactionsQuery};
use crate::domain::transaction::{TransactionDetails, TransactionSummary};
use crate::infrastructure::dto::{ListResponseDto, TransactionDetailsDto, TransactionStatusDto};
use crate::infrastructure::fixtures::{self, DEFAULT_SEED, DEFAULT_TOTAL};
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

pub const DEFAULT_LIST_FAIL_RATE: f64 = 0.15;
pub const DEFAULT_DETAILS_FAIL_RATE: f64 = 0.25;
pub const DEFAULT_MIN_LATENCY_MS: u64 = 400;
pub const DEFAULT_MAX_LATENCY_MS: u64 = 1200;

/// Mock [`TransactionsGateway`] backed by generated fixtures.
pub struct MockGateway {
    transactions: Vec<TransactionDetailsDto>,
    min_latency_ms: u64,
    max_latency_ms: u64,
    list_fail_rate: f64,
    details_fail_rate: f64,
    rng: Mutex<StdRng>,
}

impl MockGateway {
    pub fn builder() -> MockGatewayBuilder {
        MockGatewayBuilder::default()
    }

    /// Samples latency and the failure roll in one locked step so concurrent
    /// calls draw from the RNG in a serialized order. The lock is released
    /// before the caller sleeps.
    fn roll(&self, fail_rate: f64) -> (Duration, bool) {
        let mut rng = self.rng.lock().expect("mock gateway rng lock poisoned");
        let millis = rng.gen_range(self.min_latency_ms..=self.max_latency_ms);
        (Duration::from_millis(millis), rng.gen_range(0.0..1.0) < fail_rate)
    }

    fn matches(&self, tx: &TransactionDetailsDto, status: Option<TransactionStatusDto>, needle: &str) -> bool {
        if let Some(status) = status {
            if tx.summary.status != status {
                return false;
            }
        }
        if needle.is_empty() {
            return true;
        }
        [
            tx.summary.id.as_str(),
            tx.summary.reference.as_str(),
            tx.summary.customer_email.as_str(),
            tx.gateway_trace_id.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

fn status_dto(filter: StatusFilter) -> Option<TransactionStatusDto> {
    match filter {
        StatusFilter::All => None,
        StatusFilter::Pending => Some(TransactionStatusDto::Pending),
        StatusFilter::Success => Some(TransactionStatusDto::Success),
        StatusFilter::Failed => Some(TransactionStatusDto::Failed),
    }
}

#[async_trait]
impl TransactionsGateway for MockGateway {
    async fn fetch_list(&self, query: &TransactionsQuery) -> GatewayResult<Vec<TransactionSummary>> {
        let (latency, fail) = self.roll(self.list_fail_rate);
        tokio::time::sleep(latency).await;

        if fail {
            return Err(GatewayError::new(500, "List endpoint failed. Please retry."));
        }

        let status = status_dto(query.status);
        let needle = query.search.trim().to_lowercase();
        let mut matched: Vec<&TransactionDetailsDto> = self
            .transactions
            .iter()
            .filter(|tx| self.matches(tx, status, &needle))
            .collect();
        matched.sort_by(|a, b| match query.sort {
            SortOrder::Newest => b.summary.created_at.cmp(&a.summary.created_at),
            SortOrder::Oldest => a.summary.created_at.cmp(&b.summary.created_at),
        });

        // Shape the reply as the wire envelope, then map its rows to domain.
        let total = matched.len();
        let response = ListResponseDto {
            items: matched.into_iter().map(|tx| tx.summary.clone()).collect(),
            total,
        };
        tracing::debug!(total = response.total, "list request served");
        Ok(response.items.into_iter().map(Into::into).collect())
    }

    async fn fetch_details(&self, id: &str) -> GatewayResult<TransactionDetails> {
        let (latency, fail) = self.roll(self.details_fail_rate);
        tokio::time::sleep(latency).await;

        // Unknown ids are a 404 regardless of the failure roll.
        let Some(tx) = self.transactions.iter().find(|tx| tx.summary.id == id) else {
            return Err(GatewayError::new(
                404,
                format!("Transaction {id} was not found."),
            ));
        };
        if fail {
            return Err(GatewayError::new(
                500,
                format!("Details endpoint failed for {id}."),
            ));
        }

        Ok(tx.clone().into())
    }
}

/// Builder for [`MockGateway`]; defaults mirror the hosted sandbox backend.
pub struct MockGatewayBuilder {
    seed: u64,
    total: usize,
    min_latency_ms: u64,
    max_latency_ms: u64,
    list_fail_rate: f64,
    details_fail_rate: f64,
}

impl Default for MockGatewayBuilder {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            total: DEFAULT_TOTAL,
            min_latency_ms: DEFAULT_MIN_LATENCY_MS,
            max_latency_ms: DEFAULT_MAX_LATENCY_MS,
            list_fail_rate: DEFAULT_LIST_FAIL_RATE,
            details_fail_rate: DEFAULT_DETAILS_FAIL_RATE,
        }
    }
}

impl MockGatewayBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    pub fn latency_ms(mut self, min: u64, max: u64) -> Self {
        self.min_latency_ms = min;
        self.max_latency_ms = max;
        self
    }

    pub fn list_fail_rate(mut self, rate: f64) -> Self {
        self.list_fail_rate = rate;
        self
    }

    pub fn details_fail_rate(mut self, rate: f64) -> Self {
        self.details_fail_rate = rate;
        self
    }

    pub fn build(self) -> MockGateway {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let transactions = fixtures::sample_transactions(&mut rng, self.total, Utc::now());
        MockGateway {
            transactions,
            min_latency_ms: self.min_latency_ms,
            max_latency_ms: self.max_latency_ms.max(self.min_latency_ms),
            list_fail_rate: self.list_fail_rate.clamp(0.0, 1.0),
            details_fail_rate: self.details_fail_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }
}
