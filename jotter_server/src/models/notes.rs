use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use jotter::Note;

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::schema::notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NoteRow {
    pub id: i32,
    pub text: String,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        let NoteRow {
            id,
            text,
            summary,
            created_at,
        } = row;
        Note {
            id,
            text,
            summary,
            created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewNote {
    pub text: String,
}
