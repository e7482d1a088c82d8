//! Debounced searching for interactive front ends.
//!
//! Every submitted criteria snapshot gets a sequence number. A snapshot is
//! dispatched only after the debounce interval passes without a newer one, and
//! a finished search is published only if no newer snapshot was submitted in
//! the meantime.

use crate::config::SearchConfig;
use crate::model::{SearchCriteria, SearchOutcome};
use crate::search::RecipeSearch;
use crate::SearchError;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub struct SearchSession {
    search: Arc<RecipeSearch>,
    debounce: Duration,
    sequence: Arc<AtomicU64>,
    /// Debounce timer of the latest snapshot, if it has not fired yet
    pending: Mutex<Option<JoinHandle<()>>>,
    state: Arc<watch::Sender<SearchOutcome>>,
}

impl SearchSession {
    pub fn new(search: RecipeSearch, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchOutcome::default());
        SearchSession {
            search: Arc::new(search),
            debounce,
            sequence: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            state: Arc::new(state),
        }
    }

    /// Session over the provider selected in `config`, debounced by
    /// `config.debounce_ms`
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::new(RecipeSearch::new(config)?, config.debounce()))
    }

    /// Replace the current criteria. Returns the snapshot's sequence number.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, criteria: SearchCriteria) -> u64 {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }

        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            if criteria.is_empty() {
                *state = SearchOutcome::default();
            } else {
                state.mark_loading();
            }
        });

        if criteria.is_empty() {
            debug!("Search #{} has no criteria, cleared results", seq);
            return seq;
        }

        let search = Arc::clone(&self.search);
        let sequence = Arc::clone(&self.sequence);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        *pending = Some(tokio::spawn(async move {
            sleep(debounce).await;
            debug!("Dispatching search #{}", seq);

            // Not cancellable from here on; a superseded result is dropped below
            tokio::spawn(async move {
                let outcome = search.search(&criteria).await;
                let published = state.send_if_modified(|current| {
                    if sequence.load(Ordering::SeqCst) != seq {
                        return false;
                    }
                    *current = outcome;
                    true
                });
                if !published {
                    debug!("Discarding result of superseded search #{}", seq);
                }
            });
        }));

        seq
    }

    /// Watch the published state
    pub fn subscribe(&self) -> watch::Receiver<SearchOutcome> {
        self.state.subscribe()
    }

    /// Snapshot of the published state
    pub fn current(&self) -> SearchOutcome {
        self.state.borrow().clone()
    }

    /// Wait until the latest snapshot has finished searching
    pub async fn settled(&self) -> SearchOutcome {
        let mut receiver = self.subscribe();
        loop {
            {
                let state = receiver.borrow_and_update();
                if !state.is_loading {
                    return state.clone();
                }
            }
            if receiver.changed().await.is_err() {
                return self.current();
            }
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }
}
