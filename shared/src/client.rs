use crate::error::AppError;
use crate::models::{ImageUpload, SaliencyImage};
use std::future::Future;

pub const EMPTY_RESPONSE_DETAIL: &str = "empty response";

/// Sends one image to the saliency service and returns the rendered map.
///
/// Implementations issue exactly one request per call and never retry.
pub trait SaliencyClient {
    fn analyze(&self, upload: ImageUpload) -> impl Future<Output = Result<SaliencyImage, AppError>>;
}

/// Turns a completed HTTP exchange into the analysis outcome.
pub fn interpret_response(
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
) -> Result<SaliencyImage, AppError> {
    if !(200..300).contains(&status) {
        return Err(AppError::from_response(status, &body));
    }
    if body.is_empty() {
        return Err(AppError::Server {
            status,
            detail: Some(EMPTY_RESPONSE_DETAIL.into()),
        });
    }
    Ok(SaliencyImage {
        bytes: body,
        content_type,
    })
}
