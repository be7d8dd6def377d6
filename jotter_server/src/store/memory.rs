use async_trait::async_trait;
use chrono::Utc;
use jotter::Note;
use tokio::sync::RwLock;

use crate::store::{NoteStore, StoreError};

#[derive(Default)]
struct Notes {
    next_id: i32,
    notes: Vec<Note>,
}

/// Process-local store. Notes live only as long as the store does.
#[derive(Default)]
pub struct MemoryNoteStore {
    inner: RwLock<Notes>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes = self.inner.read().await.notes.clone();
        notes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notes)
    }

    async fn create(&self, text: String) -> Result<Note, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let note = Note {
            id: inner.next_id,
            text,
            summary: None,
            created_at: Utc::now(),
        };
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn get(&self, id: i32) -> Result<Option<Note>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.notes.iter().find(|note| note.id == id).cloned())
    }

    async fn set_summary(&self, id: i32, summary: &str) -> Result<Option<Note>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .map(|note| {
                note.summary = Some(summary.to_string());
                note.clone()
            }))
    }
}
