use axum::extract::FromRef;

use crate::{auth::TokenService, db::DB};

#[derive(FromRef, Clone)]
pub struct AppState {
    pub conn: DB,
    pub tokens: TokenService,
}
