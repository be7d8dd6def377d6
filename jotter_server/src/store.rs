use async_trait::async_trait;
use diesel_async::pooled_connection::PoolError;
use jotter::Note;

mod memory;
mod postgres;

pub use memory::MemoryNoteStore;
pub use postgres::PgNoteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to get a database connection: {0}")]
    Pool(#[from] bb8::RunError<PoolError>),
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Persistence for notes. Notes are created and summarized but never
/// deleted.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, newest first.
    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    /// Insert a note and return it with its assigned ID and timestamp.
    async fn create(&self, text: String) -> Result<Note, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<Note>, StoreError>;

    /// Overwrite a note's summary. Returns `None` if the note doesn't exist.
    async fn set_summary(&self, id: i32, summary: &str) -> Result<Option<Note>, StoreError>;
}
