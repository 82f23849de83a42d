use axum::{extract::State, response::IntoResponse, routing::post};

use crate::{
    extract::{Json, Valid},
    state::AppState,
};

use super::{handlers, ApiRoute, LoginRequest, SignupRequest};

pub fn routes() -> Vec<ApiRoute> {
    vec![
        ApiRoute::anonymous("/auth/signup", post(signup)),
        ApiRoute::anonymous("/auth/login", post(login)),
    ]
}

async fn signup(State(state): State<AppState>, Valid(args): Valid<SignupRequest>) -> impl IntoResponse {
    handlers::signup(state.conn, args).await.map(Json)
}

async fn login(State(state): State<AppState>, Valid(args): Valid<LoginRequest>) -> impl IntoResponse {
    handlers::login(state.conn, &state.tokens, args).await.map(Json)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        auth::{Access, LoginResponse},
        db::init_test_db,
        errors::{ErrorResponse, Result},
        tests::{login_token, signup_user, test_server},
    };

    #[test]
    fn auth_routes_are_anonymous() {
        assert!(super::routes().iter().all(|route| route.access == Access::Anonymous));
    }

    #[tokio::test]
    async fn signup_then_login() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;

        let response = server
            .post("/api/auth/signup")
            .json(&json!({
                "emailId": "a@x.com",
                "password": "Passw0rd!",
                "confirmPassword": "Passw0rd!"
            }))
            .await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<serde_json::Value>()["success"], true);

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "emailId": "a@x.com", "password": "Passw0rd!" }))
            .await;
        assert_eq!(response.status_code(), 200);

        let body = response.json::<serde_json::Value>();
        assert!(body["access_Token"].is_string());
        assert_eq!(body["user"]["emailId"], "a@x.com");
        assert!(body["user"].get("password").is_none());

        let login = response.json::<LoginResponse>();
        assert!(login.success);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_signup() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;
        signup_user(&server, "a@x.com").await;

        let response = server
            .post("/api/auth/signup")
            .json(&json!({
                "emailId": "a@x.com",
                "password": "Differ3nt#",
                "confirmPassword": "Differ3nt#"
            }))
            .await;

        assert_eq!(response.status_code(), 409);
        assert_eq!(response.json::<ErrorResponse>().error, "conflict");
        Ok(())
    }

    #[tokio::test]
    async fn signup_validation() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;

        let response = server
            .post("/api/auth/signup")
            .json(&json!({
                "emailId": "not-an-email",
                "password": "weak",
                "confirmPassword": "weak"
            }))
            .await;
        assert_eq!(response.status_code(), 400);
        assert!(response.json::<ErrorResponse>().message.len() > 1);

        let response = server
            .post("/api/auth/signup")
            .json(&json!({
                "emailId": "a@x.com",
                "password": "Passw0rd!",
                "confirmPassword": "Passw0rd?"
            }))
            .await;
        assert_eq!(response.status_code(), 400);
        assert_eq!(
            response.json::<ErrorResponse>().message,
            vec!["Password and confirm password should match".to_string()]
        );

        let response = server
            .post("/api/auth/signup")
            .json(&json!({
                "emailId": "a@x.com",
                "password": "Passw0rd!",
                "confirmPassword": "Passw0rd!",
                "role": "admin"
            }))
            .await;
        assert_eq!(response.status_code(), 400);
        Ok(())
    }

    #[tokio::test]
    async fn login_wrong_password() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;
        signup_user(&server, "a@x.com").await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "emailId": "a@x.com", "password": "Wr0ng!pass" }))
            .await;

        assert_eq!(response.status_code(), 401);
        assert_eq!(response.json::<ErrorResponse>().error, "invalid_credentials");

        // sanity: the right password still works
        login_token(&server, "a@x.com").await;
        Ok(())
    }
}
