use crate::error::AppError;
use crate::models::{FormPart, ImageUpload};
use crate::notification::ToastPosition;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/saliency";
pub const DEFAULT_FILE_FIELD: &str = "file";
pub const FALLBACK_FILE_NAME: &str = "image";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub toasts: ToastConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub file_field: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub auto_close_ms: u32,
    pub position: ToastPosition,
    pub newest_on_top: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            file_field: DEFAULT_FILE_FIELD.to_string(),
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            auto_close_ms: 5000,
            position: ToastPosition::TopCenter,
            newest_on_top: false,
        }
    }
}

impl ApiConfig {
    /// Multipart part for `upload`. The service checks the file name's
    /// extension, so a blank name is replaced rather than sent empty.
    pub fn form_part<'a>(&'a self, upload: &'a ImageUpload) -> FormPart<'a> {
        let file_name = match upload.file_name.trim() {
            "" => FALLBACK_FILE_NAME,
            name => name,
        };
        FormPart {
            field: &self.file_field,
            file_name,
            media_type: &upload.media_type,
            bytes: &upload.bytes,
        }
    }
}

impl ClientConfig {
    pub fn from_yaml(source: &str) -> Result<Self, AppError> {
        let config: ClientConfig =
            serde_yaml::from_str(source).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses the embedded YAML, then applies the build-time endpoint
    /// override. Falls back to defaults when the YAML is unusable.
    pub fn load(source: &str, endpoint_override: Option<&str>) -> Self {
        let mut config = Self::from_yaml(source).unwrap_or_else(|e| {
            log::error!("Failed to load client config, using defaults: {}", e);
            Self::default()
        });
        if let Some(endpoint) = endpoint_override.map(str::trim).filter(|e| !e.is_empty()) {
            log::info!("Saliency endpoint overridden: {}", endpoint);
            config.api.endpoint = endpoint.to_string();
        }
        config
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(AppError::Config("api.endpoint must not be empty".into()));
        }
        if self.api.file_field.trim().is_empty() {
            return Err(AppError::Config("api.file_field must not be empty".into()));
        }
        Ok(())
    }
}
