use std::fmt;

#[derive(Debug)]
pub enum GenError {
    ConfigError(String),
    RequestError(String),
    ResponseError(String),
    SerializationError(String),
    AuthError(String),
    RateLimitError(String),
    UpstreamError(String),
    EmptyResponseError(String),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GenError::RequestError(msg) => write!(f, "Request error: {}", msg),
            GenError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            GenError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            GenError::AuthError(msg) => write!(f, "Authentication error: {}", msg),
            GenError::RateLimitError(msg) => write!(f, "Rate limit error: {}", msg),
            GenError::UpstreamError(msg) => write!(f, "Upstream API error: {}", msg),
            GenError::EmptyResponseError(msg) => write!(f, "Empty response: {}", msg),
        }
    }
}

impl std::error::Error for GenError {}

impl GenError {
    /// Classify an upstream failure by its message text. Best-effort
    /// substring matching, case-insensitive; anything unrecognized becomes
    /// an `UpstreamError` wrapping the original text.
    pub fn classify_upstream(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("api key not valid") || lower.contains("permission denied") {
            GenError::AuthError(
                "API key is invalid or missing required permissions. \
                 Please check your API key settings."
                    .into(),
            )
        } else if lower.contains("quota") || lower.contains("rate limit") {
            GenError::RateLimitError(
                "API request limit reached. Please try again later or check your quota.".into(),
            )
        } else {
            GenError::UpstreamError(message.to_string())
        }
    }

    /// The message carried by the error, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            GenError::ConfigError(msg)
            | GenError::RequestError(msg)
            | GenError::ResponseError(msg)
            | GenError::SerializationError(msg)
            | GenError::AuthError(msg)
            | GenError::RateLimitError(msg)
            | GenError::UpstreamError(msg)
            | GenError::EmptyResponseError(msg) => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
