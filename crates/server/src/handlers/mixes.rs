//! # Mix Handlers
//!
//! JSON CRUD for slide mixes. Drafts are validated against the same URL
//! matcher the oEmbed endpoint uses before they reach the store.

use super::{AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use slidemix::{MixDraft, MixError, SlideMix};
use tracing::info;
use uuid::Uuid;

/// A mix together with its parsed URL list.
#[derive(Serialize)]
pub struct MixResponse {
    #[serde(flatten)]
    pub mix: SlideMix,
    pub urls: Vec<String>,
}

impl From<SlideMix> for MixResponse {
    fn from(mix: SlideMix) -> Self {
        let urls = mix.urls().into_iter().map(str::to_string).collect();
        Self { mix, urls }
    }
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| MixError::NotFound(id.to_string()).into())
}

pub async fn list_mixes_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<SlideMix>>, AppError> {
    let limit = app_state.config.mixes.recent_limit;
    Ok(Json(app_state.mixes.list_recent(limit).await?))
}

pub async fn create_mix_handler(
    State(app_state): State<AppState>,
    Json(draft): Json<MixDraft>,
) -> Result<(StatusCode, Json<MixResponse>), AppError> {
    draft.validate(app_state.oembed.matcher())?;
    let mix = app_state.mixes.create(draft).await?;
    info!("Created mix {} ('{}')", mix.id, mix.title);
    Ok((StatusCode::CREATED, Json(mix.into())))
}

pub async fn get_mix_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MixResponse>, AppError> {
    let uuid = parse_id(&id)?;
    let mix = app_state
        .mixes
        .find(uuid)
        .await?
        .ok_or(MixError::NotFound(id))?;
    Ok(Json(mix.into()))
}

pub async fn update_mix_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<MixDraft>,
) -> Result<Json<MixResponse>, AppError> {
    let uuid = parse_id(&id)?;
    draft.validate(app_state.oembed.matcher())?;
    let mix = app_state
        .mixes
        .update(uuid, draft)
        .await?
        .ok_or(MixError::NotFound(id))?;
    info!("Updated mix {}", mix.id);
    Ok(Json(mix.into()))
}
