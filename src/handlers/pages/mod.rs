use axum::{
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::{
    error::AppError,
    service::{NoteService, SaveOutcome},
    views,
};

#[debug_handler]
pub async fn list_notes(State(service): State<Arc<NoteService>>) -> Result<Response, AppError> {
    let ids = service.list_note_ids().await?;

    Ok(Html(views::note_list(&ids)).into_response())
}

/// POST replaces the note with the request body; every other method shows
/// the editor.
#[debug_handler]
pub async fn note(
    State(service): State<Arc<NoteService>>,
    method: Method,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let Path(id) = id?;

    if method == Method::POST {
        let body = String::from_utf8(body.to_vec())?;
        match service.save_note(&id, &body).await? {
            SaveOutcome::Saved => tracing::debug!("Saved note '{}' ({} bytes)", id, body.len()),
            SaveOutcome::Deleted => tracing::debug!("Deleted note '{}'", id),
        }
        return Ok((StatusCode::OK, "OK").into_response());
    }

    let note = service.get_note(&id).await?;

    Ok(Html(views::note_editor(&id, note.as_ref().map(|note| note.body.as_str()))).into_response())
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found())).into_response()
}
