use std::fmt::Display;

use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput},
    ToSql,
};
use serde::{Deserialize, Serialize};

pub mod store;

pub type UserId = String;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum UserStatus {
    Active,
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl FromSql for UserStatus {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().and_then(|v| match v {
            "active" => Ok(Self::Active),
            _ => Err(FromSqlError::InvalidType),
        })
    }
}

impl ToSql for UserStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email_id: UserId,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub status: UserStatus,
    pub created_at: i64,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("email_id", &self.email_id)
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .field("password", &"[redacted]")
            .finish()
    }
}
