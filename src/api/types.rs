//! Wire types for the portal API.
//!
//! Every response body is a `{code, message, data}` envelope. The backend
//! reports business failures (bad credentials, wrong verification code) as
//! HTTP 200 with a non-200 envelope code, so callers check `is_success()`
//! and show `message` when it is false.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope code meaning business success
pub const SUCCESS_CODE: u32 = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Payload issued on successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginGrant {
    pub username: String,
    pub role: String,
    pub token: String,
    /// Expiry instant, sent by the backend as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expire: DateTime<Utc>,
}

/// Which flow an emailed verification code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Register,
    Reset,
}

impl CodeKind {
    /// Value of the `type` query parameter on the ask-code endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeKind::Register => "register",
            CodeKind::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub code: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmResetRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_with_grant() {
        let json = r#"{
            "code": 200,
            "message": "ok",
            "data": {
                "username": "alice",
                "role": "user",
                "token": "tok-abc",
                "expire": 1756100000000
            }
        }"#;
        let resp: ApiResponse<LoginGrant> = serde_json::from_str(json).unwrap();
        assert!(resp.is_success());
        let grant = resp.data.unwrap();
        assert_eq!(grant.username, "alice");
        assert_eq!(grant.token, "tok-abc");
        assert_eq!(grant.expire.timestamp_millis(), 1_756_100_000_000);
    }

    #[test]
    fn test_failure_envelope_without_data() {
        let json = r#"{"code": 400, "message": "wrong verification code", "data": null}"#;
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.message, "wrong verification code");
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_missing_message_defaults_empty() {
        let json = r#"{"code": 200, "data": null}"#;
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.message, "");
    }

    #[test]
    fn test_code_kind_query_values() {
        assert_eq!(CodeKind::Register.as_str(), "register");
        assert_eq!(CodeKind::Reset.as_str(), "reset");
    }
}
