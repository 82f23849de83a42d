use axum::{
    http::{header, HeaderValue},
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use rand::Rng;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use crate::{
    auth::{self, ApiRoute, TokenService},
    config::config,
    db::DB,
    errors::on_error,
    notes,
    state::AppState,
};

pub struct AppParams {
    pub db: DB,
    pub tokens: TokenService,
}

pub fn create(AppParams { db, tokens }: AppParams) -> Router {
    let state = AppState {
        conn: db.clone(),
        tokens,
    };

    let api = auth::mount(state.clone(), auth::routes().into_iter().chain(notes::routes()));

    auth::mount(state, ops_routes())
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(Extension(db))
                .layer(middleware::from_fn(on_error)),
        )
}

fn ops_routes() -> Vec<ApiRoute> {
    vec![
        ApiRoute::anonymous("/__version__", get(version)),
        ApiRoute::anonymous("/__heartbeat__", get(heartbeat)),
        ApiRoute::anonymous("/__lbheartbeat__", get(lbheartbeat)),
    ]
}

async fn version() -> impl IntoResponse {
    let config = config();
    Json(json!({
        "source" : config.source,
        "version": config.version,
        "commit" : config.git_commit,
        "build"  : config.pipeline_id
    }))
}

async fn heartbeat() -> impl IntoResponse {
    let mut rng = rand::thread_rng();
    let random: u32 = rng.gen_range(0..=10000);

    Json(json!({
        "status" : "ok",
        "random": random,
    }))
}

async fn lbheartbeat() -> impl IntoResponse {
    ""
}
