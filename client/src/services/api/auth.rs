//! # Authentication Endpoints
//!
//! Signup, login and account management under `/auth`.

use std::sync::Arc;

use shared::dto::auth::{
    AuthResponse, Credentials, EmailRequest, ResetPasswordRequest, UpdateUserDetails,
};

use crate::core::auth::AuthToken;
use crate::core::error::{ApiError, Result};
use crate::core::transport::{decode, ApiRequest, Transport};

const AUTH: &str = "auth";

/// Client for the `/auth` resource.
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn Transport>,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call(&self, request: ApiRequest) -> Result<AuthResponse> {
        decode(self.transport.execute(request).await?)
    }

    /// Sign up with email and password.
    #[tracing::instrument(skip_all, fields(email = %email))]
    pub async fn signup_with_email_and_password(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<AuthResponse> {
        let body = credentials(email, password, Some(role));
        self.call(ApiRequest::post([AUTH, "signup", "emailandpassword"]).json(&body)?)
            .await
    }

    /// Confirm an email address with the token from the verification mail.
    pub async fn verify_email(&self, user_id: &str, token: &str) -> Result<AuthResponse> {
        let request = ApiRequest::get([AUTH, "verify"])
            .query("user", user_id)
            .query("token", token);
        self.call(request).await
    }

    /// Login with email and password. The session token is in `token`.
    #[tracing::instrument(skip_all, fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str, role: &str) -> Result<AuthResponse> {
        tracing::info!("Attempting login");
        let body = credentials(email, password, Some(role));
        let result = self.call(ApiRequest::post([AUTH, "login"]).json(&body)?).await;

        match &result {
            Ok(_) => tracing::info!("Login successful"),
            Err(e) => tracing::warn!(error = %e, "Login failed"),
        }
        result
    }

    /// Change email, password or recovery email of the caller.
    pub async fn update_user_details(
        &self,
        auth: &AuthToken,
        details: &UpdateUserDetails,
    ) -> Result<AuthResponse> {
        if details.is_empty() {
            return Err(ApiError::InvalidInput("nothing to update".to_string()));
        }
        let request = ApiRequest::put([AUTH, "update"]).bearer(auth).json(details)?;
        self.call(request).await
    }

    #[tracing::instrument(skip_all, fields(email = %email))]
    pub async fn delete_account(&self, auth: &AuthToken, email: &str) -> Result<AuthResponse> {
        let request = ApiRequest::delete([AUTH, "delete"])
            .query("email", email)
            .bearer(auth);
        self.call(request).await
    }

    #[tracing::instrument(skip_all, fields(email = %email))]
    pub async fn disable_account(&self, auth: &AuthToken, email: &str) -> Result<AuthResponse> {
        let body = EmailRequest { email: email.to_string() };
        let request = ApiRequest::put([AUTH, "disable"]).bearer(auth).json(&body)?;
        self.call(request).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<AuthResponse> {
        let body = EmailRequest { email: email.to_string() };
        self.call(ApiRequest::post([AUTH, "forgot-password"]).json(&body)?)
            .await
    }

    pub async fn reset_password(&self, reset_token: &str, new_password: &str) -> Result<AuthResponse> {
        let body = ResetPasswordRequest { new_password: new_password.to_string() };
        let request = ApiRequest::post([AUTH, "reset-password"])
            .query("resetToken", reset_token)
            .json(&body)?;
        self.call(request).await
    }

    #[tracing::instrument(skip_all, fields(email = %email))]
    pub async fn admin_signup(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = credentials(email, password, None);
        self.call(ApiRequest::post([AUTH, "signup", "admin"]).json(&body)?)
            .await
    }

    /// Ask the backend whether `auth` is still accepted.
    pub async fn is_valid(&self, auth: &AuthToken) -> Result<AuthResponse> {
        self.call(ApiRequest::get([AUTH, "is-valid"]).bearer(auth)).await
    }
}

fn credentials(email: &str, password: &str, role: Option<&str>) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
        role: role.map(str::to_string),
    }
}
