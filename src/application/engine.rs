use crate::application::slot::{ResourceSlot, SlotState};
use crate::domain::ports::{GatewayResult, SharedGateway};
use crate::domain::query::{SortOrder, StatusFilter, TransactionsQuery};
use crate::domain::transaction::{TransactionDetails, TransactionStatus, TransactionSummary};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;

/// Quiet window for coalescing search keystrokes into a single fetch.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// The main entry point for browsing transactions.
///
/// `ConsoleEngine` owns the query parameters, the current selection and the
/// two resource slots (list and detail), and keeps the slots consistent with
/// the latest user input by dispatching fetches to the gateway and
/// reconciling their results.
///
/// Each pipeline carries a monotonically increasing generation counter,
/// bumped on every trigger. A fetch captures the generation it was spawned
/// under and its result is applied only if the counter is unchanged at
/// settlement, so the slot always reflects the most recent trigger no matter
/// in which order responses arrive. Superseded results are discarded, never
/// surfaced.
///
/// All state transitions happen inside one mutex that is never held across
/// an await, which serializes triggers and settlements the way a
/// single-threaded event loop would. Handles are cheap to clone and share;
/// methods must be called from within a tokio runtime since triggers spawn
/// the gateway calls.
#[derive(Clone)]
pub struct ConsoleEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    gateway: SharedGateway,
    debounce: Duration,
    list_slot: ResourceSlot<Vec<TransactionSummary>>,
    details_slot: ResourceSlot<Option<TransactionDetails>>,
    selection: watch::Sender<Option<String>>,
    state: Mutex<EngineState>,
}

#[derive(Default)]
struct EngineState {
    query: TransactionsQuery,
    selected_id: Option<String>,
    list_generation: u64,
    details_generation: u64,
    /// Guards the pending search debounce timer: a timer fires only if the
    /// epoch it captured is still current, so immediate triggers and newer
    /// keystrokes invalidate it without racing.
    search_epoch: u64,
}

impl ConsoleEngine {
    /// Creates an engine with the default 300 ms search debounce.
    ///
    /// Construction performs no fetch; issue `retry_list()` once to load the
    /// initial result set.
    pub fn new(gateway: SharedGateway) -> Self {
        Self::with_debounce(gateway, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(gateway: SharedGateway, debounce: Duration) -> Self {
        let (selection, _) = watch::channel(None);
        Self {
            inner: Arc::new(EngineInner {
                gateway,
                debounce,
                list_slot: ResourceSlot::new(),
                details_slot: ResourceSlot::new(),
                selection,
                state: Mutex::new(EngineState::default()),
            }),
        }
    }

    /// Replaces the status filter and refetches immediately, flushing any
    /// pending debounced search trigger into this fetch.
    pub fn set_status_filter(&self, status: StatusFilter) {
        let mut st = self.inner.lock_state();
        if st.query.status == status {
            return;
        }
        st.query.status = status;
        self.inner.trigger_list(&mut st);
    }

    /// Replaces the sort order and refetches immediately, flushing any
    /// pending debounced search trigger into this fetch.
    pub fn set_sort_order(&self, sort: SortOrder) {
        let mut st = self.inner.lock_state();
        if st.query.sort == sort {
            return;
        }
        st.query.sort = sort;
        self.inner.trigger_list(&mut st);
    }

    /// Replaces the search text (stored trimmed) and schedules a debounced
    /// fetch. A burst of calls within the quiet window collapses to one
    /// fetch using the final value; setting the same value again is a no-op.
    pub fn set_search_text(&self, text: &str) {
        let trimmed = text.trim();
        let mut st = self.inner.lock_state();
        if st.query.search == trimmed {
            return;
        }
        st.query.search = trimmed.to_string();
        st.search_epoch += 1;
        let epoch = st.search_epoch;
        drop(st);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            let mut st = inner.lock_state();
            if st.search_epoch != epoch {
                // A newer keystroke or an immediate trigger superseded this
                // timer while it slept.
                return;
            }
            inner.trigger_list(&mut st);
        });
    }

    /// Refetches the list for the current query parameters, superseding any
    /// in-flight list fetch. Immediate, never debounced.
    pub fn retry_list(&self) {
        let mut st = self.inner.lock_state();
        self.inner.trigger_list(&mut st);
    }

    /// Selects a transaction and fetches its details.
    ///
    /// The detail slot is cleared synchronously, before any network
    /// activity, so the previous transaction's detail can never show against
    /// the new selection. Re-selecting the current id refetches.
    pub fn select_transaction(&self, id: &str) {
        let mut st = self.inner.lock_state();
        st.selected_id = Some(id.to_string());
        self.inner.selection.send_replace(Some(id.to_string()));
        self.inner.details_slot.reset();
        self.inner.trigger_details(&mut st, id.to_string());
    }

    /// Clears the selection and resets the detail slot without fetching.
    /// Any in-flight detail fetch is logically cancelled.
    pub fn clear_selection(&self) {
        let mut st = self.inner.lock_state();
        st.selected_id = None;
        st.details_generation += 1;
        self.inner.selection.send_replace(None);
        self.inner.details_slot.reset();
    }

    /// Refetches details for the current selection; no-op when nothing is
    /// selected.
    pub fn retry_details(&self) {
        let mut st = self.inner.lock_state();
        if let Some(id) = st.selected_id.clone() {
            self.inner.details_slot.reset();
            self.inner.trigger_details(&mut st, id);
        }
    }

    pub fn list_state(&self) -> SlotState<Vec<TransactionSummary>> {
        self.inner.list_slot.snapshot()
    }

    pub fn details_state(&self) -> SlotState<Option<TransactionDetails>> {
        self.inner.details_slot.snapshot()
    }

    pub fn selection(&self) -> Option<String> {
        self.inner.selection.borrow().clone()
    }

    /// Snapshot of the current query parameters.
    pub fn query(&self) -> TransactionsQuery {
        self.inner.lock_state().query.clone()
    }

    /// Number of failed transactions in the currently loaded list.
    pub fn failed_count(&self) -> usize {
        self.inner
            .list_slot
            .snapshot()
            .data
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Failed)
            .count()
    }

    pub fn watch_list(&self) -> watch::Receiver<SlotState<Vec<TransactionSummary>>> {
        self.inner.list_slot.subscribe()
    }

    pub fn watch_details(&self) -> watch::Receiver<SlotState<Option<TransactionDetails>>> {
        self.inner.details_slot.subscribe()
    }

    pub fn watch_selection(&self) -> watch::Receiver<Option<String>> {
        self.inner.selection.subscribe()
    }

    /// Waits until the list slot is not loading and returns its state.
    /// Call after a trigger; the loading mark is set synchronously, so this
    /// cannot observe the pre-trigger state.
    pub async fn settled_list(&self) -> SlotState<Vec<TransactionSummary>> {
        let mut rx = self.inner.list_slot.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.inner.list_slot.snapshot(),
        }
    }

    /// Waits until the detail slot is not loading and returns its state.
    pub async fn settled_details(&self) -> SlotState<Option<TransactionDetails>> {
        let mut rx = self.inner.details_slot.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.inner.details_slot.snapshot(),
        }
    }
}

impl EngineInner {
    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().expect("engine state lock poisoned")
    }

    /// Starts a list fetch for the current query under the caller's lock:
    /// bumps the generation, marks the slot loading and spawns the call.
    fn trigger_list(self: &Arc<Self>, st: &mut EngineState) {
        // An immediate trigger replaces a pending debounced search trigger;
        // the query snapshot below already carries the latest search text.
        st.search_epoch += 1;
        st.list_generation += 1;
        let generation = st.list_generation;
        let query = st.query.clone();
        self.list_slot.mark_loading();
        tracing::debug!(
            generation,
            status = %query.status,
            search = %query.search,
            sort = %query.sort,
            "list fetch triggered"
        );

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let result = inner.gateway.fetch_list(&query).await;
            inner.settle_list(generation, result);
        });
    }

    fn settle_list(&self, generation: u64, result: GatewayResult<Vec<TransactionSummary>>) {
        let st = self.lock_state();
        if st.list_generation != generation {
            tracing::debug!(
                generation,
                current = st.list_generation,
                "discarding superseded list response"
            );
            return;
        }
        match result {
            Ok(items) => {
                tracing::debug!(generation, rows = items.len(), "list fetch settled");
                self.list_slot.mark_success(items);
            }
            Err(err) => {
                tracing::debug!(generation, status_code = err.status_code, "list fetch failed");
                self.list_slot.mark_error(err.message);
            }
        }
    }

    fn trigger_details(self: &Arc<Self>, st: &mut EngineState, id: String) {
        st.details_generation += 1;
        let generation = st.details_generation;
        self.details_slot.mark_loading();
        tracing::debug!(generation, id = %id, "details fetch triggered");

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let result = inner.gateway.fetch_details(&id).await;
            inner.settle_details(generation, result);
        });
    }

    fn settle_details(&self, generation: u64, result: GatewayResult<TransactionDetails>) {
        let st = self.lock_state();
        if st.details_generation != generation {
            tracing::debug!(
                generation,
                current = st.details_generation,
                "discarding superseded details response"
            );
            return;
        }
        match result {
            Ok(details) => {
                tracing::debug!(generation, id = %details.summary.id, "details fetch settled");
                self.details_slot.mark_success(Some(details));
            }
            Err(err) => {
                tracing::debug!(generation, status_code = err.status_code, "details fetch failed");
                self.details_slot.mark_error(err.message);
            }
        }
    }
}
