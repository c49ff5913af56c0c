use thiserror::Error;

/// Transport-level failures from the portal API.
///
/// Every variant gets the same treatment upstream: one diagnostic log, one
/// generic user notice, then propagation to the caller. Business failures
/// reported inside a 2xx envelope are not errors at this layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        // The cut must land on a char boundary; portal messages are often
        // multi-byte and a mid-char slice would panic
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::Status {
            status,
            body: Self::truncate_body(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_keeps_short_bodies() {
        let err = ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_truncates_long_bodies() {
        let huge = "x".repeat(2000);
        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &huge);
        match err {
            ApiError::Status { body, .. } => {
                assert!(body.len() < huge.len());
                assert!(body.contains("truncated, 2000 total bytes"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_truncates_multibyte_bodies_on_char_boundary() {
        // 200 three-byte chars: 600 bytes, and byte 500 falls mid-char
        let huge = "错".repeat(200);
        let err = ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, &huge);
        match err {
            ApiError::Status { body, .. } => {
                assert!(body.contains("truncated, 600 total bytes"));
                let prefix = body.split("...").next().unwrap();
                assert!(prefix.chars().all(|c| c == '错'));
                assert_eq!(prefix.len(), 498);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
