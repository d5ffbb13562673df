pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod notification;
pub mod state;

pub use client::{SaliencyClient, interpret_response};
pub use config::ClientConfig;
pub use error::{AppError, ValidationError};
pub use models::{DataUrl, FormPart, ImageUpload, RequestState, SaliencyImage, SelectedImage, ViewMode};
pub use notification::{Notification, NotificationKind, Notifications, ToastPosition};
pub use state::{AppState, DecodeTicket};
pub use uuid::Uuid;
