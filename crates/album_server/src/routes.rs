//! Album HTTP routes.
//!
//! Each handler decodes its input, makes exactly one service call on the
//! blocking pool, and maps the result to a response.

use std::sync::Arc;

use album_core::{Album, AlbumService, RepoResult, SharedAlbumRepository};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::ApiError;

/// State shared across album handlers.
pub struct AlbumState {
    service: AlbumService<SharedAlbumRepository>,
}

impl AlbumState {
    pub fn new(repo: SharedAlbumRepository) -> Self {
        Self {
            service: AlbumService::new(repo),
        }
    }
}

/// Builds the album router around shared state.
pub fn album_routes(state: Arc<AlbumState>) -> Router {
    Router::new()
        .route(
            "/albums",
            get(list_albums_handler).post(create_album_handler),
        )
        .route(
            "/albums/{id}",
            get(get_album_handler)
                .put(update_album_handler)
                .delete(delete_album_handler),
        )
        .with_state(state)
}

// Storage calls are synchronous; keep them off the async workers.
async fn run_blocking<T, F>(state: Arc<AlbumState>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AlbumService<SharedAlbumRepository>) -> RepoResult<T> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || op(&state.service))
        .await
        .map_err(|err| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("storage task failed: {err}"),
            )
        })?;
    Ok(outcome?)
}

async fn list_albums_handler(
    State(state): State<Arc<AlbumState>>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let albums = run_blocking(state, |service| service.list_albums()).await?;
    Ok(Json(albums))
}

async fn create_album_handler(
    State(state): State<Arc<AlbumState>>,
    body: Result<Json<Album>, JsonRejection>,
) -> Result<(StatusCode, Json<Album>), ApiError> {
    let Json(album) = body?;
    let created = run_blocking(state, move |service| service.create_album(&album)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_album_handler(
    State(state): State<Arc<AlbumState>>,
    Path(id): Path<String>,
) -> Result<Json<Album>, ApiError> {
    let album = run_blocking(state, move |service| service.get_album(&id)).await?;
    Ok(Json(album))
}

async fn update_album_handler(
    State(state): State<Arc<AlbumState>>,
    Path(id): Path<String>,
    body: Result<Json<Album>, JsonRejection>,
) -> Result<Json<Album>, ApiError> {
    let Json(album) = body?;
    let updated =
        run_blocking(state, move |service| service.update_album(&id, &album)).await?;
    Ok(Json(updated))
}

async fn delete_album_handler(
    State(state): State<Arc<AlbumState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    run_blocking(state, move |service| service.delete_album(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
