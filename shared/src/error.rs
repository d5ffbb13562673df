use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "Error processing image";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("no image selected")]
    NoImageSelected,
    #[error("a request is already in flight")]
    RequestInFlight,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },
    #[error("could not read file: {0}")]
    FileRead(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure body produced by the saliency service, `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

impl AppError {
    /// Classifies a non-2xx response, keeping the server's explanation when
    /// the body carries one.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.detail)
            .and_then(detail_text);
        AppError::Server { status, detail }
    }

    /// Text shown to the user in the error toast.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(ValidationError::UnsupportedFileType(_)) => {
                "Please select an image file (JPEG/PNG)".to_string()
            }
            AppError::Validation(ValidationError::NoImageSelected) => {
                "Please select an image first!".to_string()
            }
            AppError::Validation(ValidationError::RequestInFlight) => {
                "Please wait for the current analysis to finish".to_string()
            }
            AppError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            AppError::FileRead(_) => "Could not read the selected file".to_string(),
            AppError::Network(_) | AppError::Server { detail: None, .. } | AppError::Config(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

// FastAPI sends a plain string for HTTPException and a list of
// `{loc, msg, type}` items for request validation failures.
fn detail_text(detail: Value) -> Option<String> {
    match detail {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
