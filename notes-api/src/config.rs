use std::{sync::OnceLock, time::Duration};

use serde::Deserialize;

use crate::auth::TokenConfig;

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,

    // auth
    pub jwt_secret: Option<String>,
    #[serde(default = "default_jwt_expires_in")]
    pub jwt_expires_in: u64,

    #[serde(default)]
    pub log_json: bool,

    // build
    #[serde(default = "default_local")]
    pub source: String,
    #[serde(default = "default_local")]
    pub git_commit: String,
    #[serde(default = "default_local")]
    pub pipeline_id: String,
    #[serde(default = "default_local")]
    pub version: String,
}

fn default_port() -> u16 {
    4000
}

fn default_database_url() -> String {
    "sqlite.db".into()
}

fn default_jwt_expires_in() -> u64 {
    10_000
}

fn default_local() -> String {
    "local".into()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Self>()
    }

    /// Token settings handed to [`crate::auth::TokenService`] at startup.
    pub fn token_config(&self) -> crate::Result<TokenConfig> {
        let secret = self
            .jwt_secret
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| crate::Error::Unexpected("JWT_SECRET is not set".into()))?;

        Ok(TokenConfig {
            secret,
            expires_in: Duration::from_secs(self.jwt_expires_in),
        })
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| Config::from_env().expect("invalid environment configuration"))
}
