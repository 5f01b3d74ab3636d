use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{
    CatalogPage, GameDetails, InteractionRequest, LoginRequest, RegistrationRequest, Session,
    Slot, Viewer,
};
use crate::services::{
    accounts, catalog,
    catalog::SimilarGames,
    home::{self, HomeFeed, SlotView},
};

use super::extract::{blank_as_none, ApiJson, ApiPath, ApiQuery};
use super::AppState;

// Request types

/// Identity the client holds, passed as query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<u64>,
    pub name: Option<String>,
}

impl ViewerQuery {
    fn viewer(&self) -> Viewer {
        Viewer::from_user_id(self.user_id)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Landing page with all four recommendation slots
pub async fn home_feed(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ViewerQuery>,
) -> Json<HomeFeed> {
    let viewer = query.viewer();
    let feed = home::build_home_feed(&state.resolver, &viewer, query.name.as_deref()).await;
    Json(feed)
}

/// Re-resolve a single slot
pub async fn home_slot(
    State(state): State<AppState>,
    ApiPath(slot): ApiPath<String>,
    ApiQuery(query): ApiQuery<ViewerQuery>,
) -> AppResult<Json<SlotView>> {
    let slot: Slot = slot.parse().map_err(AppError::InvalidInput)?;
    let view = home::refresh_slot(&state.resolver, slot, &query.viewer()).await;
    Ok(Json(view))
}

/// Catalog listing with name search and pagination
pub async fn list_games(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CatalogQuery>,
) -> AppResult<Json<CatalogPage>> {
    let limit = query.limit.unwrap_or(state.catalog_page_size);
    let page =
        catalog::list_games(state.catalog.clone(), query.q.as_deref(), query.offset, limit).await?;
    Ok(Json(page))
}

/// Product page details
pub async fn game_details(
    State(state): State<AppState>,
    ApiPath(game_id): ApiPath<u64>,
) -> AppResult<Json<GameDetails>> {
    let details = catalog::game_details(state.catalog.clone(), game_id).await?;
    Ok(Json(details))
}

/// Games similar to the one on the product page
pub async fn similar_games(
    State(state): State<AppState>,
    ApiPath(game_id): ApiPath<u64>,
) -> Json<SimilarGames> {
    Json(catalog::similar_games(&state.resolver, game_id).await)
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Json<Session>> {
    let session = accounts::login(state.catalog.clone(), &request.name).await?;
    Ok(Json(session))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<Session>)> {
    let session = accounts::register(state.catalog.clone(), request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn record_interaction(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<InteractionRequest>,
) -> AppResult<StatusCode> {
    accounts::record_interaction(state.catalog.clone(), request).await?;
    Ok(StatusCode::NO_CONTENT)
}
