use super::{handlers, state::AppState};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/oembed", get(handlers::oembed_handler))
        .route("/oembed/", get(handlers::oembed_handler))
        .route("/oembed.json", get(handlers::oembed_json_handler))
        .route("/oembed.xml", get(handlers::oembed_xml_handler))
        .route(
            "/mixes",
            get(handlers::list_mixes_handler).post(handlers::create_mix_handler),
        )
        .route(
            "/mixes/{id}",
            get(handlers::get_mix_handler).put(handlers::update_mix_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
