//! One call wrapper per portal auth endpoint.
//!
//! Each method maps named parameters onto a single HTTP call and nothing
//! else; header injection and the failure funnel live in the client core.
//! Passwords never appear in the diagnostic payload strings.

use anyhow::Result;
use serde_json::Value;

use super::client::ApiClient;
use super::types::{
    ApiResponse, CodeKind, ConfirmResetRequest, LoginGrant, RegisterRequest, ResetPasswordRequest,
};

/// Envelope for endpoints that only acknowledge
pub type Ack = ApiResponse<Value>;

impl ApiClient {
    /// Log in with username and password (form-urlencoded, public path)
    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse<LoginGrant>> {
        self.post_form(
            "/api/auth/login",
            &[("username", username), ("password", password)],
            Some(format!("username={}&password=<redacted>", username)),
        )
        .await
    }

    /// Invalidate the current token server-side
    pub async fn logout(&self) -> Result<Ack> {
        self.get("/api/auth/logout", None, None).await
    }

    /// Request an emailed verification code for registration or reset
    pub async fn ask_code(&self, email: &str, kind: CodeKind) -> Result<Ack> {
        self.get(
            "/api/auth/ask-code",
            Some(&[("email", email), ("type", kind.as_str())]),
            Some(format!("email={}&type={}", email, kind.as_str())),
        )
        .await
    }

    /// Create an account with an emailed verification code
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        code: &str,
        password: &str,
    ) -> Result<Ack> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            code: code.to_string(),
            password: password.to_string(),
        };
        self.post_json(
            "/api/auth/register",
            &body,
            Some(format!(
                "username={} email={} code={} password=<redacted>",
                username, email, code
            )),
        )
        .await
    }

    /// Check that an email address has an account before starting a reset
    pub async fn verify_account(&self, email: &str) -> Result<Ack> {
        self.get(
            "/api/auth/verify-account",
            Some(&[("email", email)]),
            Some(format!("email={}", email)),
        )
        .await
    }

    /// Step one of a password reset: confirm the emailed code
    pub async fn reset_confirm(&self, email: &str, code: &str) -> Result<Ack> {
        let body = ConfirmResetRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.post_json(
            "/api/auth/reset-confirm",
            &body,
            Some(format!("email={} code={}", email, code)),
        )
        .await
    }

    /// Step two of a password reset: set the new password
    pub async fn reset_password(&self, email: &str, code: &str, password: &str) -> Result<Ack> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            code: code.to_string(),
            password: password.to_string(),
        };
        self.post_json(
            "/api/auth/reset-password",
            &body,
            Some(format!("email={} code={} password=<redacted>", email, code)),
        )
        .await
    }
}
