use std::{sync::Arc, time::Duration};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{ctx::Identity, Error, Result};

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expires_in: Duration,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub email_id: String,
    pub iat: u64,
    pub exp: u64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity::new(claims.email_id)
    }
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<Inner>,
}

struct Inner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            inner: Arc::new(Inner {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                validation,
                expires_in: config.expires_in,
            }),
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String> {
        let iat = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            email_id: identity.email_id.clone(),
            iat,
            exp: iat + self.inner.expires_in.as_secs(),
        };

        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.inner.encoding).map_err(Error::Token)
    }

    /// Any decoding failure (signature, expiry, shape) is reported as [`Error::Unauthorized`].
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("rejected token: {e}");
                Error::Unauthorized
            })
    }
}
