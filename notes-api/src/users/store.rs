use rusqlite::{named_params, OptionalExtension, Row};

use crate::db::{self, DB};

use super::*;

impl<'a> TryFrom<&Row<'a>> for User {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> Result<Self, Self::Error> {
        Ok(Self {
            email_id: row.get(0)?,
            password: row.get(1)?,
            status: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct InsertUserParameters {
    pub email_id: String,
    pub password_hash: String,
    pub status: UserStatus,
    pub created_at: i64,
}

/// Inserts the user unless the email is already taken.
/// Returns `None` when a row with this email exists; the stored row is never touched.
pub async fn insert(db: DB, args: InsertUserParameters) -> db::Result<Option<User>> {
    let user = db
        .call(move |conn| {
            conn.query_row(
                r#"INSERT INTO users (email_id, password, status, created_at) VALUES (:email_id, :password, :status, :created_at)
                    ON CONFLICT(email_id) DO NOTHING
                    RETURNING email_id, password, status, created_at"#,
                named_params! {
                    ":email_id": args.email_id,
                    ":password": args.password_hash,
                    ":status": args.status,
                    ":created_at": args.created_at,
                },
                |r| User::try_from(r),
            )
            .optional()
            .map_err(|e| e.into())
        })
        .await?;

    Ok(user)
}

pub async fn find_one_by_email(db: DB, email_id: impl Into<String>) -> db::Result<User> {
    let email_id = email_id.into();
    let message = format!("User '{}' not found", email_id);

    let user = db
        .call(move |conn| {
            conn.query_row(
                "SELECT email_id, password, status, created_at FROM users WHERE email_id = ?",
                [email_id],
                |r| User::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await
        .map_err(db::Error::from)
        .map_err(|e| e.not_found_message(message))?;

    Ok(user)
}

pub async fn exists(db: DB, email_id: impl Into<String>) -> db::Result<bool> {
    let email_id = email_id.into();

    let exists = db
        .call(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email_id = ?)",
                [email_id],
                |r| r.get::<_, bool>(0),
            )
            .map_err(|e| e.into())
        })
        .await?;

    Ok(exists)
}
