use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::config::ApiConfig;
use shared::{AppError, ImageUpload, SaliencyClient, SaliencyImage, interpret_response};
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// Posts images to the saliency endpoint with `fetch`.
#[derive(Clone)]
pub struct GlooSaliencyClient {
    config: ApiConfig,
}

impl GlooSaliencyClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn form_data(&self, upload: &ImageUpload) -> Result<FormData, AppError> {
        let part = self.config.form_part(upload);
        let file = GlooFile::new_with_options(part.file_name, part.bytes, Some(part.media_type), None);
        let form_data = FormData::new().map_err(js_error)?;
        form_data
            .append_with_blob_and_filename(part.field, file.as_ref(), part.file_name)
            .map_err(js_error)?;
        Ok(form_data)
    }
}

impl SaliencyClient for GlooSaliencyClient {
    async fn analyze(&self, upload: ImageUpload) -> Result<SaliencyImage, AppError> {
        // The browser sets the multipart boundary itself.
        let request = Request::post(&self.config.endpoint)
            .body(self.form_data(&upload)?)
            .map_err(|e| AppError::Network(e.to_string()))?;

        let response = request.send().await.map_err(|e| {
            gloo_console::error!("Error:", e.to_string());
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .binary()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        log::info!("{} answered {} ({} bytes)", self.config.endpoint, status, body.len());
        interpret_response(status, content_type, body)
    }
}

fn js_error(err: JsValue) -> AppError {
    AppError::Network(format!("{:?}", err))
}
