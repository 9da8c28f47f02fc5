//! Screen lifecycle: build the empty list, fetch once in the background,
//! apply the result on the UI thread.

pub mod events;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use catalog_client::{CatalogSource, FetchErrorKind};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{
    presenter::{DatasetChange, ListPresenter},
    view::{ImageLoader, ListView, RowBinder},
};

use events::ScreenEvent;

const EVENT_QUEUE_CAPACITY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Initializing,
    Loading,
    Loaded { row_count: usize },
    Failed { kind: FetchErrorKind, reason: String },
}

impl ScreenState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Failed { .. })
    }
}

/// Owns the list view and presenter for one screen lifetime.
///
/// All methods run on the UI thread. The fetch runs on `runtime` and its
/// result comes back through a channel drained by [`ScreenController::pump`],
/// so the collection is only ever replaced on the UI thread. Dropping the
/// controller aborts a fetch still in flight.
pub struct ScreenController<V: ListView> {
    view: V,
    presenter: ListPresenter,
    source: Arc<dyn CatalogSource>,
    loader: Arc<dyn ImageLoader>,
    runtime: Handle,
    state: ScreenState,
    events_tx: Sender<ScreenEvent>,
    events_rx: Receiver<ScreenEvent>,
    fetch_task: Option<JoinHandle<()>>,
    torn_down: bool,
}

impl<V: ListView> ScreenController<V> {
    pub fn new(
        view: V,
        source: Arc<dyn CatalogSource>,
        loader: Arc<dyn ImageLoader>,
        runtime: Handle,
    ) -> Self {
        let (events_tx, events_rx) = bounded(EVENT_QUEUE_CAPACITY);
        let mut controller = Self {
            view,
            presenter: ListPresenter::new(),
            source,
            loader,
            runtime,
            state: ScreenState::Initializing,
            events_tx,
            events_rx,
            fetch_task: None,
            torn_down: false,
        };
        controller.notify_view(&DatasetChange::default());
        controller
    }

    /// Moves to `Loading` and spawns the one fetch of this screen lifetime.
    pub fn start(&mut self) {
        if self.torn_down {
            warn!("catalog screen torn down; not starting fetch");
            return;
        }
        if self.state != ScreenState::Initializing {
            warn!(state = ?self.state, "catalog screen already started; ignoring");
            return;
        }

        let source = Arc::clone(&self.source);
        let events_tx = self.events_tx.clone();
        self.fetch_task = Some(self.runtime.spawn(async move {
            let result = source.fetch_items().await;
            match events_tx.try_send(ScreenEvent::FetchCompleted(result)) {
                Ok(()) => {}
                Err(TrySendError::Disconnected(_)) => {
                    debug!("catalog screen gone before fetch completed");
                }
                Err(TrySendError::Full(_)) => {
                    warn!("catalog screen event queue full; dropping fetch result");
                }
            }
        }));
        self.state = ScreenState::Loading;
        debug!("catalog fetch started");
    }

    /// Applies at most one pending event without blocking.
    pub fn pump(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        match self.events_rx.try_recv() {
            Ok(event) => {
                self.apply(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Blocks until the screen leaves `Loading` or `timeout` elapses. A
    /// timeout too large to express as an instant waits without limit.
    pub fn pump_until_settled(&mut self, timeout: Duration) -> &ScreenState {
        let deadline = Instant::now().checked_add(timeout);
        while !self.torn_down && self.state == ScreenState::Loading {
            let received = match deadline {
                Some(deadline) => self.events_rx.recv_deadline(deadline),
                None => self
                    .events_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(event) => self.apply(event),
                Err(RecvTimeoutError::Timeout) => {
                    warn!(?timeout, "catalog fetch still pending");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        &self.state
    }

    /// Aborts any in-flight fetch. Pending and future events are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(task) = self.fetch_task.take() {
            if !task.is_finished() {
                debug!("aborting in-flight catalog fetch");
            }
            task.abort();
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn presenter(&self) -> &ListPresenter {
        &self.presenter
    }

    pub fn row_binder(&self) -> RowBinder<'_> {
        RowBinder::new(&self.presenter, self.loader.as_ref())
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn apply(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::FetchCompleted(result) => {
                if self.state != ScreenState::Loading {
                    warn!(state = ?self.state, "unexpected fetch completion; ignoring");
                    return;
                }
                match result {
                    Ok(items) => {
                        let change = self.presenter.replace_all(items);
                        info!(row_count = change.row_count, "catalog loaded");
                        self.state = ScreenState::Loaded {
                            row_count: change.row_count,
                        };
                        self.notify_view(&change);
                    }
                    Err(err) => {
                        let kind = err.kind();
                        error!(?kind, error = %err, "catalog fetch failed; list stays empty");
                        self.state = ScreenState::Failed {
                            kind,
                            reason: err.to_string(),
                        };
                    }
                }
            }
        }
    }

    fn notify_view(&mut self, change: &DatasetChange) {
        let binder = RowBinder::new(&self.presenter, self.loader.as_ref());
        self.view.dataset_changed(&binder, change);
    }
}

impl<V: ListView> Drop for ScreenController<V> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
