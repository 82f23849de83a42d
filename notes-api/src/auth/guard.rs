//! Bearer-token access guard and the route table it is attached through.
//!
//! Every route is declared as an [`ApiRoute`] carrying its [`Access`] level.
//! [`mount`] wraps the [`Access::Authenticated`] entries with
//! [`require_identity`], which verifies the `Authorization: Bearer` token and
//! stores the resulting [`Identity`] in the request extensions, where
//! [`crate::ctx::Ctx`] picks it up.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
    Router,
};

use crate::{ctx::Identity, state::AppState, Error, Result};

use super::TokenService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anonymous,
    Authenticated,
}

#[derive(Clone)]
pub struct ApiRoute {
    pub path: &'static str,
    pub access: Access,
    pub method_router: MethodRouter<AppState>,
}

impl ApiRoute {
    pub fn anonymous(path: &'static str, method_router: MethodRouter<AppState>) -> Self {
        Self {
            path,
            access: Access::Anonymous,
            method_router,
        }
    }

    pub fn authenticated(path: &'static str, method_router: MethodRouter<AppState>) -> Self {
        Self {
            path,
            access: Access::Authenticated,
            method_router,
        }
    }
}

pub fn mount(state: AppState, routes: impl IntoIterator<Item = ApiRoute>) -> Router {
    routes
        .into_iter()
        .fold(Router::new(), |router, route| {
            let method_router = match route.access {
                Access::Anonymous => route.method_router,
                Access::Authenticated => route
                    .method_router
                    .route_layer(middleware::from_fn_with_state(state.clone(), require_identity)),
            };
            router.route(route.path, method_router)
        })
        .with_state(state)
}

pub async fn require_identity(State(tokens): State<TokenService>, mut request: Request, next: Next) -> Result<Response> {
    let token = bearer_token(request.headers()).ok_or(Error::Unauthorized)?;
    let identity = Identity::from(tokens.verify(token)?);

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');

    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) if !token.is_empty() => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(authorization: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(authorization));
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
