use std::convert::Infallible;

use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};

use crate::{db::DB, Error, Result};

#[derive(Clone, Debug, FromRequestParts)]
pub struct BaseParams {
    pub ctx: Ctx,
    #[from_request(via(Extension))]
    pub db: DB,
}

impl BaseParams {
    pub fn new(db: DB, ctx: Ctx) -> Self {
        Self { db, ctx }
    }
}

/// The verified caller, as attached by the access guard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email_id: String,
}

impl Identity {
    pub fn new(email_id: impl Into<String>) -> Self {
        Self {
            email_id: email_id.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub user: Option<Identity>,
}

impl Ctx {
    pub fn new(user: Option<Identity>) -> Self {
        Self { user }
    }

    pub fn user(&self) -> Result<&Identity> {
        self.user.as_ref().ok_or(Error::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        Ok(Self {
            user: parts.extensions.get::<Identity>().cloned(),
        })
    }
}
