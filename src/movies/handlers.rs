use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::Curator,
    errors::AppError,
    extract::{JsonBody, PathParam},
    movies::{
        dto::{DeletedResponse, MovieFilter, MoviePayload, MovieResponse},
        services,
    },
    state::AppState,
};

// GET addresses a movie by slug, PUT and DELETE by id. They share one path
// segment so the router sees a single parameter name.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/:key",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route("/themes", get(list_themes))
}

// --- public ---

#[instrument(skip(state))]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(filter): Query<MovieFilter>,
) -> Result<Json<Vec<MovieResponse>>, AppError> {
    let movies = services::list_movies(state.movies.as_ref(), filter.theme()).await?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_movie(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = services::get_movie(state.movies.as_ref(), &slug).await?;
    Ok(Json(movie.into()))
}

#[instrument(skip(state))]
pub async fn list_themes(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let themes = services::list_themes(state.movies.as_ref()).await?;
    Ok(Json(themes))
}

// --- curator only ---
// Curator runs before PathParam and JsonBody, so auth failures win over bad input.

#[instrument(skip(state, curator, payload), fields(curator_id = %curator.0.id))]
pub async fn create_movie(
    State(state): State<AppState>,
    curator: Curator,
    JsonBody(payload): JsonBody<MoviePayload>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    let movie = services::create_movie(state.movies.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(movie.into())))
}

#[instrument(skip(state, curator, payload), fields(curator_id = %curator.0.id))]
pub async fn update_movie(
    State(state): State<AppState>,
    curator: Curator,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<MoviePayload>,
) -> Result<Json<MovieResponse>, AppError> {
    let movie = services::update_movie(state.movies.as_ref(), id, payload).await?;
    Ok(Json(movie.into()))
}

#[instrument(skip(state, curator), fields(curator_id = %curator.0.id))]
pub async fn delete_movie(
    State(state): State<AppState>,
    curator: Curator,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    services::delete_movie(state.movies.as_ref(), id).await?;
    Ok(Json(DeletedResponse {
        message: "Movie deleted".into(),
    }))
}
