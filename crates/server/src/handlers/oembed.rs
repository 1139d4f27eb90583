//! # oEmbed Handlers
//!
//! `GET /oembed`, `/oembed.json` and `/oembed.xml`. The path suffix only picks
//! a format when the `format` query parameter is absent.

use super::{AppError, AppState};
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use slidemix::Format;
use tracing::info;

#[derive(Debug, Deserialize, Default)]
pub struct OembedParams {
    pub url: Option<String>,
    pub format: Option<String>,
}

pub async fn oembed_handler(
    State(app_state): State<AppState>,
    Query(params): Query<OembedParams>,
) -> Result<Response, AppError> {
    respond(app_state, params, None).await
}

pub async fn oembed_json_handler(
    State(app_state): State<AppState>,
    Query(params): Query<OembedParams>,
) -> Result<Response, AppError> {
    respond(app_state, params, Some("json")).await
}

pub async fn oembed_xml_handler(
    State(app_state): State<AppState>,
    Query(params): Query<OembedParams>,
) -> Result<Response, AppError> {
    respond(app_state, params, Some("xml")).await
}

async fn respond(
    app_state: AppState,
    params: OembedParams,
    path_format: Option<&str>,
) -> Result<Response, AppError> {
    info!("Received oEmbed request: {:?}", params);
    let url = params
        .url
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing required parameter: url".to_string()))?;
    let format = Format::resolve(params.format.as_deref(), path_format)?;

    let encoded = app_state.oembed.resolve(url, format).await?;
    Ok(([(header::CONTENT_TYPE, encoded.content_type)], encoded.body).into_response())
}
