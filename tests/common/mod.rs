use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use txconsole::application::engine::ConsoleEngine;
use txconsole::application::slot::SlotState;
use txconsole::domain::ports::{GatewayError, GatewayResult, TransactionsGateway};
use txconsole::domain::query::TransactionsQuery;
use txconsole::domain::transaction::{
    PaymentMethod, TransactionDetails, TransactionStatus, TransactionSummary,
};

/// One scripted reply for a gateway endpoint.
pub enum Reply<T> {
    /// Resolve with this result after the given delay.
    After(Duration, GatewayResult<T>),
    /// Never resolve; models a request stuck in flight.
    Never,
}

/// Gateway double that replays scripted replies in call order and records
/// every query it receives. Panics on calls that were not scripted, so tests
/// also assert that no extra fetches happen.
pub struct ScriptedGateway {
    list_plan: Mutex<VecDeque<Reply<Vec<TransactionSummary>>>>,
    details_plan: Mutex<VecDeque<Reply<TransactionDetails>>>,
    list_queries: Mutex<Vec<TransactionsQuery>>,
    details_ids: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            list_plan: Mutex::new(VecDeque::new()),
            details_plan: Mutex::new(VecDeque::new()),
            list_queries: Mutex::new(Vec::new()),
            details_ids: Mutex::new(Vec::new()),
        })
    }

    pub fn push_list(&self, reply: Reply<Vec<TransactionSummary>>) {
        self.list_plan.lock().unwrap().push_back(reply);
    }

    pub fn push_details(&self, reply: Reply<TransactionDetails>) {
        self.details_plan.lock().unwrap().push_back(reply);
    }

    /// Queries received by `fetch_list`, in call order.
    pub fn list_queries(&self) -> Vec<TransactionsQuery> {
        self.list_queries.lock().unwrap().clone()
    }

    /// Ids received by `fetch_details`, in call order.
    pub fn details_ids(&self) -> Vec<String> {
        self.details_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionsGateway for ScriptedGateway {
    async fn fetch_list(&self, query: &TransactionsQuery) -> GatewayResult<Vec<TransactionSummary>> {
        self.list_queries.lock().unwrap().push(query.clone());
        let reply = self
            .list_plan
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted fetch_list call");
        match reply {
            Reply::After(delay, result) => {
                tokio::time::sleep(delay).await;
                result
            }
            Reply::Never => std::future::pending().await,
        }
    }

    async fn fetch_details(&self, id: &str) -> GatewayResult<TransactionDetails> {
        self.details_ids.lock().unwrap().push(id.to_string());
        let reply = self
            .details_plan
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted fetch_details call");
        match reply {
            Reply::After(delay, result) => {
                tokio::time::sleep(delay).await;
                result
            }
            Reply::Never => std::future::pending().await,
        }
    }
}

pub fn summary(id: &str, hours_ago: i64) -> TransactionSummary {
    TransactionSummary {
        id: id.to_string(),
        reference: format!("PAY-{id}"),
        amount: dec!(100.00),
        currency: "USD".to_string(),
        status: TransactionStatus::Success,
        created_at: Utc::now() - TimeDelta::hours(hours_ago),
        customer_email: "customer1@example.com".to_string(),
    }
}

pub fn failed_summary(id: &str, hours_ago: i64) -> TransactionSummary {
    TransactionSummary {
        status: TransactionStatus::Failed,
        ..summary(id, hours_ago)
    }
}

pub fn details(id: &str) -> TransactionDetails {
    TransactionDetails {
        summary: summary(id, 1),
        gateway_trace_id: format!("gw_{id}"),
        payment_method: PaymentMethod::Card,
        failure_code: None,
        failure_reason: None,
        raw_payload: serde_json::json!({ "merchant": "Atlas Market" }),
    }
}

pub fn server_error(message: &str) -> GatewayError {
    GatewayError::new(500, message)
}

/// Waits for a debounced list fetch to start and then to settle. Needed when
/// no synchronous trigger ran, so the slot may still be idle when this is
/// called.
pub async fn settled_after_debounce(engine: &ConsoleEngine) -> SlotState<Vec<TransactionSummary>> {
    let mut rx = engine.watch_list();
    rx.wait_for(|state| state.loading)
        .await
        .expect("engine dropped");
    rx.wait_for(|state| !state.loading)
        .await
        .expect("engine dropped")
        .clone()
}
