use crate::{
    ctx::Identity,
    db::{self, DB},
    users::{
        store::{self, InsertUserParameters},
        UserStatus,
    },
    Error, Result,
};

use super::{
    password::{hash_password, verify_password},
    LoginRequest, LoginResponse, SignupRequest, SignupResponse, TokenService,
};

pub async fn signup(
    db: DB,
    SignupRequest {
        email_id,
        password,
        confirm_password,
    }: SignupRequest,
) -> Result<SignupResponse> {
    if password != confirm_password {
        return Err(Error::validation("Password and confirm password should match"));
    }

    // fast path, skips hashing; the insert below is what enforces uniqueness
    if store::exists(db.clone(), email_id.clone()).await? {
        return Err(Error::Conflict("Emailid already exists".into()));
    }

    let password_hash = hash_password(password).await?;

    store::insert(
        db,
        InsertUserParameters {
            email_id: email_id.clone(),
            password_hash,
            status: UserStatus::Active,
            created_at: chrono::Utc::now().timestamp_millis(),
        },
    )
    .await?
    .ok_or_else(|| Error::Conflict("Emailid already exists".into()))?;

    tracing::info!("{email_id} signed up");

    Ok(SignupResponse {
        success: true,
        message: "Registered Successfully!".into(),
    })
}

pub async fn login(db: DB, tokens: &TokenService, LoginRequest { email_id, password }: LoginRequest) -> Result<LoginResponse> {
    let user = store::find_one_by_email(db, email_id).await.map_err(|e| match e {
        db::Error::NotFound(_) => Error::InvalidCredentials,
        e => Error::from(e),
    })?;

    if !verify_password(password, user.password.clone()).await? {
        return Err(Error::InvalidCredentials);
    }

    let access_token = tokens.issue(&Identity::new(user.email_id.clone()))?;

    tracing::info!("{} logged in", user.email_id);

    Ok(LoginResponse {
        success: true,
        user,
        access_token,
        message: "Logged In successfully!".into(),
    })
}
