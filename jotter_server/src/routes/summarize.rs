use axum::{
    extract::{Path, State},
    response::Json,
};
use jotter::{ErrorResponse, Note, SummaryResponse};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{models::state::JotterState, utils};

const NOT_FOUND: &str = "Note not found";

pub fn router(state: JotterState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(summarize_note))
        .with_state(state)
}

async fn find_note(state: &JotterState, id: i32) -> Result<Note, utils::ApiError> {
    state
        .store
        .get(id)
        .await
        .map_err(utils::internal_error)?
        .ok_or_else(|| utils::not_found(NOT_FOUND))
}

/// Summarize a note and store the summary on it.
///
/// If the inference API is unavailable or answers with something
/// unexpected, a placeholder built from the start of the note is stored
/// and returned instead.
#[utoipa::path(
    post,
    path = "/{id}",
    params(
        ("id" = i32, Path, description = "Database ID of the note to summarize"),
    ),
    responses(
        (status = 200, description = "Successfully summarized the note", body = SummaryResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Note couldn't be loaded or updated", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn summarize_note(
    State(state): State<JotterState>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, utils::ApiError> {
    // An ID that isn't an integer can't match any note.
    let id: i32 = id.parse().map_err(|_| utils::not_found(NOT_FOUND))?;

    // Only existing notes get a lock entry. The note is read again once the
    // lock is held so this request sees the latest stored state.
    find_note(&state, id).await?;
    let _guard = state.summary_locks.lock(id).await;
    let note = find_note(&state, id).await?;

    let outcome = state.summary_client.summarize(&note.text).await;
    tracing::info!(id, degraded = outcome.is_degraded(), "summarized note");
    let summary = outcome.into_summary();
    state
        .store
        .set_summary(id, &summary)
        .await
        .map_err(utils::internal_error)?
        .ok_or_else(|| utils::not_found(NOT_FOUND))?;
    Ok(Json(SummaryResponse { summary }))
}
