use std::{collections::HashSet, fmt};

use jotter::Note;

#[derive(Debug, PartialEq)]
pub enum SummaryRefusal {
    UnknownNote(i32),
    AlreadyPending(i32),
}

impl fmt::Display for SummaryRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNote(id) => write!(f, "no note with ID {id}"),
            Self::AlreadyPending(id) => write!(f, "note {id} is already being summarized"),
        }
    }
}

/// Everything the client shows. Nothing is persisted; the server is the
/// only source of truth and the list is fetched once at startup.
#[derive(Default)]
pub struct NotesView {
    notes: Vec<Note>,
    draft: String,
    pending: HashSet<i32>,
}

impl NotesView {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    /// The draft to send, or `None` if it's blank and shouldn't be sent.
    pub fn submittable_draft(&self) -> Option<String> {
        if self.draft.trim().is_empty() {
            None
        } else {
            Some(self.draft.clone())
        }
    }

    /// A note was stored by the server. It goes to the top of the list and
    /// the draft is cleared.
    pub fn note_added(&mut self, note: Note) {
        self.notes.insert(0, note);
        self.draft.clear();
    }

    pub fn is_pending(&self, id: i32) -> bool {
        self.pending.contains(&id)
    }

    /// Mark a note as being summarized. Only that note is blocked from
    /// another summary request until it finishes.
    pub fn begin_summary(&mut self, id: i32) -> Result<(), SummaryRefusal> {
        if !self.notes.iter().any(|note| note.id == id) {
            return Err(SummaryRefusal::UnknownNote(id));
        }
        if !self.pending.insert(id) {
            return Err(SummaryRefusal::AlreadyPending(id));
        }
        Ok(())
    }

    /// Apply the result of a summary request. The note is no longer pending
    /// either way, but only a successful request changes its summary.
    pub fn finish_summary(&mut self, id: i32, result: Result<String, String>) -> Option<&Note> {
        self.pending.remove(&id);
        match result {
            Ok(summary) => {
                let note = self.notes.iter_mut().find(|note| note.id == id)?;
                note.summary = Some(summary);
                Some(&*note)
            }
            Err(err) => {
                tracing::error!(id, "error summarizing note: {err}");
                None
            }
        }
    }

    pub fn render_note(&self, note: &Note) -> String {
        let mut out = format!(
            "[{}] {} | {}",
            note.id,
            note.created_at.format("%Y-%m-%d %H:%M"),
            note.text
        );
        if let Some(summary) = &note.summary {
            out.push_str(&format!("\n    Summary: {summary}"));
        }
        if self.is_pending(note.id) {
            out.push_str("\n    (summarizing...)");
        }
        out
    }

    pub fn render(&self) -> String {
        if self.notes.is_empty() {
            return "No notes yet.".to_string();
        }
        self.notes
            .iter()
            .map(|note| self.render_note(note))
            .collect::<Vec<String>>()
            .join("\n")
    }
}
