use tokio::sync::watch;

/// Observable state of one asynchronously fetched resource.
///
/// Cycles `Idle -> Loading -> {Success, Error} -> Loading -> ...` for the
/// engine's lifetime. `data` is defaulted (not carried over) while loading
/// and after an error: the contract is "current query failed", not "show
/// stale data".
#[derive(Debug, Clone, PartialEq)]
pub struct SlotState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for SlotState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
        }
    }
}

/// State holder for one resource, published through a watch channel.
///
/// Mutated only by the orchestration engine; the presentation layer reads
/// snapshots or subscribes for change notifications.
pub struct ResourceSlot<T> {
    tx: watch::Sender<SlotState<T>>,
}

impl<T: Clone + Default> ResourceSlot<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SlotState::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> SlotState<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SlotState<T>> {
        self.tx.subscribe()
    }

    pub fn mark_loading(&self) {
        self.tx.send_replace(SlotState {
            data: T::default(),
            loading: true,
            error: None,
        });
    }

    pub fn mark_success(&self, data: T) {
        self.tx.send_replace(SlotState {
            data,
            loading: false,
            error: None,
        });
    }

    pub fn mark_error(&self, message: String) {
        self.tx.send_replace(SlotState {
            data: T::default(),
            loading: false,
            error: Some(message),
        });
    }

    /// Returns the slot to its idle start state.
    pub fn reset(&self) {
        self.tx.send_replace(SlotState::default());
    }
}

impl<T: Clone + Default> Default for ResourceSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
