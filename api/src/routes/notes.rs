//! Notes API routes

use std::sync::Arc;

use axum::{extract::State, Json};

use radar_db::Notes;

use crate::{error::ApiResult, AppState};

/// GET /api/notes
pub async fn get_notes(State(state): State<Arc<AppState>>) -> ApiResult<Json<Notes>> {
    Ok(Json(Notes::load(state.store.as_ref()).await?))
}

/// PUT /api/notes
/// Replaces the stored notes
pub async fn put_notes(
    State(state): State<Arc<AppState>>,
    Json(notes): Json<Notes>,
) -> ApiResult<Json<Notes>> {
    notes.save(state.store.as_ref()).await?;
    Ok(Json(notes))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use radar_db::MemoryStore;
    use serde_json::json;

    use crate::test_support::{send, state};

    #[tokio::test]
    async fn test_notes_roundtrip() {
        let app_state = state(Arc::new(MemoryStore::new()));

        let (_, body) = send(app_state.clone(), "GET", "/api/notes", None).await;
        assert_eq!(body, json!({ "body": "" }));

        let notes = json!({ "body": "- Rotate into strong sectors" });
        let (status, _) = send(app_state.clone(), "PUT", "/api/notes", Some(notes.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app_state, "GET", "/api/notes", None).await;
        assert_eq!(body, notes);
    }
}
