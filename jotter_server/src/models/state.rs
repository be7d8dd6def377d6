use std::{collections::HashMap, sync::Arc};

use axum::extract::FromRef;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{client::SummaryClient, store::NoteStore};

/// One async lock per note so summaries of the same note run one at a time.
/// Summaries of different notes don't wait on each other.
#[derive(Clone, Default)]
pub struct SummaryLocks(Arc<Mutex<HashMap<i32, Arc<Mutex<()>>>>>);

impl SummaryLocks {
    pub async fn lock(&self, id: i32) -> OwnedMutexGuard<()> {
        let lock = self.0.lock().await.entry(id).or_default().clone();
        lock.lock_owned().await
    }

    /// Number of notes that have a lock entry.
    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[derive(Clone)]
pub struct JotterState {
    pub store: Arc<dyn NoteStore>,
    pub summary_client: SummaryClient,
    pub summary_locks: SummaryLocks,
}

impl JotterState {
    pub fn new(store: Arc<dyn NoteStore>, summary_client: SummaryClient) -> Self {
        Self {
            store,
            summary_client,
            summary_locks: SummaryLocks::default(),
        }
    }
}

impl FromRef<JotterState> for Arc<dyn NoteStore> {
    fn from_ref(state: &JotterState) -> Arc<dyn NoteStore> {
        state.store.clone()
    }
}
