use async_trait::async_trait;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use jotter::Note;

use crate::{
    models::notes::{NewNote, NoteRow},
    schema,
    store::{NoteStore, StoreError},
    utils,
};

#[derive(Clone)]
pub struct PgNoteStore {
    pool: utils::Pool,
}

impl PgNoteStore {
    pub fn new(pool: utils::Pool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<utils::Conn<'_>, StoreError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let mut conn = self.conn().await?;
        let rows = schema::notes::table
            .select(NoteRow::as_select())
            .order((schema::notes::created_at.desc(), schema::notes::id.desc()))
            .load(&mut conn)
            .await?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn create(&self, text: String) -> Result<Note, StoreError> {
        let mut conn = self.conn().await?;
        let row = diesel::insert_into(schema::notes::table)
            .values(NewNote { text })
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(row.into())
    }

    async fn get(&self, id: i32) -> Result<Option<Note>, StoreError> {
        let mut conn = self.conn().await?;
        let row = schema::notes::table
            .select(NoteRow::as_select())
            .filter(schema::notes::id.eq(id))
            .first(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Note::from))
    }

    async fn set_summary(&self, id: i32, summary: &str) -> Result<Option<Note>, StoreError> {
        let mut conn = self.conn().await?;
        let row = diesel::update(schema::notes::table.filter(schema::notes::id.eq(id)))
            .set(schema::notes::summary.eq(summary))
            .returning(NoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;
        Ok(row.map(Note::from))
    }
}
