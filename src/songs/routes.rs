//! Songs HTTP Routes
//!
//! - `POST   /songs`      create
//! - `GET    /songs`      list (`?title=&performer=`)
//! - `GET    /songs/:id`  get by id
//! - `PUT    /songs/:id`  full update
//! - `DELETE /songs/:id`  delete

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::errors::{SongError, SongResult, ValidationDetails};
use super::handler::SongsHandler;
use super::model::SongQuery;
use super::response::{DataResponse, MessageResponse, SongData, SongIdData, SongsData};

// ==================
// Songs Routes
// ==================

/// Create songs routes
pub fn songs_routes(handler: Arc<SongsHandler>) -> Router {
    Router::new()
        .route("/songs", get(list_songs_handler).post(create_song_handler))
        .route(
            "/songs/:id",
            get(get_song_handler)
                .put(update_song_handler)
                .delete(delete_song_handler),
        )
        .with_state(handler)
}

// ==================
// Helper Functions
// ==================

/// Turn framework body rejections (bad JSON, wrong content type) into
/// validation failures so they share the failure envelope.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> SongResult<Value> {
    body.map(|Json(value)| value).map_err(|rejection| {
        SongError::validation(ValidationDetails::new(
            "$body",
            "JSON object",
            rejection.body_text(),
        ))
    })
}

/// Same treatment for query strings the list filters cannot be read from
fn list_query(query: Result<Query<SongQuery>, QueryRejection>) -> SongResult<SongQuery> {
    query.map(|Query(query)| query).map_err(|rejection| {
        SongError::validation(ValidationDetails::new(
            "$query",
            "at most one title and one performer parameter",
            rejection.body_text(),
        ))
    })
}

// ==================
// Handlers
// ==================

async fn create_song_handler(
    State(handler): State<Arc<SongsHandler>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<SongIdData>>), SongError> {
    let payload = json_body(body)?;
    let response = handler.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_songs_handler(
    State(handler): State<Arc<SongsHandler>>,
    query: Result<Query<SongQuery>, QueryRejection>,
) -> Result<Json<DataResponse<SongsData>>, SongError> {
    let query = list_query(query)?;
    Ok(Json(handler.list(&query).await?))
}

async fn get_song_handler(
    State(handler): State<Arc<SongsHandler>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<SongData>>, SongError> {
    Ok(Json(handler.get_by_id(&id).await?))
}

async fn update_song_handler(
    State(handler): State<Arc<SongsHandler>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, SongError> {
    let payload = json_body(body)?;
    Ok(Json(handler.update(&id, &payload).await?))
}

async fn delete_song_handler(
    State(handler): State<Arc<SongsHandler>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, SongError> {
    Ok(Json(handler.delete(&id).await?))
}
