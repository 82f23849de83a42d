use serde::{Deserialize, Serialize};

use crate::{
    users::User,
    validation::{Validate, Violations},
    Result,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignupRequest {
    pub email_id: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .not_empty("emailId", &self.email_id)
            .email("emailId", &self.email_id)
            .not_empty("confirmPassword", &self.confirm_password)
            .password("confirmPassword", &self.confirm_password)
            .not_empty("password", &self.password)
            .password("password", &self.password)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email_id: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .not_empty("emailId", &self.email_id)
            .not_empty("password", &self.password)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
    #[serde(rename = "access_Token")]
    pub access_token: String,
    pub message: String,
}
