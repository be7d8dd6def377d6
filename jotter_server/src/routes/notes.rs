use std::sync::Arc;

use axum::{extract::State, response::Json};
use jotter::{ErrorResponse, NewNoteRequest, Note};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{models::state::JotterState, store::NoteStore, utils};

pub fn router(state: JotterState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(add_note, list_notes))
        .with_state(state)
}

/// Add and return a note.
///
/// The note text isn't validated; empty text is stored as-is.
#[utoipa::path(
    post,
    path = "",
    request_body = NewNoteRequest,
    responses(
        (status = 200, description = "Successfully added a note", body = Note),
        (status = 500, description = "Note couldn't be stored", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn add_note(
    State(store): State<Arc<dyn NoteStore>>,
    Json(body): Json<NewNoteRequest>,
) -> Result<Json<Note>, utils::ApiError> {
    let NewNoteRequest { text } = body;
    let note = store.create(text).await.map_err(utils::internal_error)?;
    tracing::info!(id = note.id, "added note");
    Ok(Json(note))
}

/// List all notes, newest first.
#[utoipa::path(
    get,
    path = "",
    responses(
        (status = 200, description = "Successfully listed notes", body = [Note]),
        (status = 500, description = "Notes couldn't be loaded", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_notes(
    State(store): State<Arc<dyn NoteStore>>,
) -> Result<Json<Vec<Note>>, utils::ApiError> {
    let notes = store.list().await.map_err(utils::internal_error)?;
    Ok(Json(notes))
}
