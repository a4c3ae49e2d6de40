use http::StatusCode;

/// Errors surfaced at the HTTP boundary as `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid input.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid token, bad credentials, or acting on someone else's record.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Store, hashing or serialization failure. Never shown to clients.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Render the JSON error body, logging internal failures on the way out.
    pub fn body(&self) -> Vec<u8> {
        if let ApiError::Internal(err) = self {
            tracing::error!(error = %err, "internal server error");
        }
        serde_json::json!({ "error": self.public_message() })
            .to_string()
            .into_bytes()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ApiError> for spin_sdk::http::Response {
    fn from(err: ApiError) -> Self {
        spin_sdk::http::Response::builder()
            .status(err.status().as_u16())
            .header("Content-Type", "application/json")
            .body(err.body())
            .build()
    }
}
