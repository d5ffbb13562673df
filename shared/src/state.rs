//! Upload-and-view state: the selected image, the analysis result, the view
//! toggle and the in-flight flag, updated only through the transitions below.
//!
//! `R` is the displayable handle of a result. The browser stores an object
//! URL there; anything that derefs to `str` works.

use crate::error::{AppError, ValidationError};
use crate::models::{ImageUpload, RequestState, SelectedImage, ViewMode, is_image_media_type};
use crate::notification::Notifications;
use std::ops::Deref;
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Processing complete!";
pub const IMAGE_CHANGED_MESSAGE: &str = "The image changed while processing; please resubmit";

/// Identifies one asynchronous file read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<R> {
    selected: Option<SelectedImage>,
    result: Option<R>,
    view: ViewMode,
    request: RequestState,
    pending_decode: Option<DecodeTicket>,
    next_ticket: u64,
    // Bumped whenever the selected image is replaced.
    image_generation: u64,
    submitted_generation: Option<u64>,
    notifications: Notifications,
}

impl<R> Default for AppState<R> {
    fn default() -> Self {
        Self {
            selected: None,
            result: None,
            view: ViewMode::Original,
            request: RequestState::Idle,
            pending_decode: None,
            next_ticket: 0,
            image_generation: 0,
            submitted_generation: None,
            notifications: Notifications::default(),
        }
    }
}

impl<R> AppState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn is_loading(&self) -> bool {
        self.request == RequestState::InFlight
    }

    pub fn is_decoding(&self) -> bool {
        self.pending_decode.is_some()
    }

    /// Whether the submit control accepts a click.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.is_loading()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn dismiss_notification(&mut self, id: Uuid) -> bool {
        self.notifications.dismiss(id)
    }

    /// Validates a freshly picked file. On success the caller reads the file
    /// and reports back through [`AppState::finish_decode`].
    pub fn select_file(&mut self, file_name: &str, media_type: &str) -> Result<DecodeTicket, AppError> {
        if !is_image_media_type(media_type) {
            log::warn!("Rejected {} with media type {:?}", file_name, media_type);
            return Err(self.report(ValidationError::UnsupportedFileType(media_type.to_string()).into()));
        }

        let ticket = DecodeTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_decode = Some(ticket);
        log::info!("Decoding {} ({})", file_name, media_type);
        Ok(ticket)
    }

    /// Stores the decoded image. Reads superseded by a newer selection are
    /// dropped and return `false`.
    pub fn finish_decode(&mut self, ticket: DecodeTicket, image: SelectedImage) -> bool {
        if self.pending_decode != Some(ticket) {
            log::debug!("Dropping stale decode {:?}", ticket);
            return false;
        }
        self.pending_decode = None;
        self.selected = Some(image);
        self.image_generation += 1;
        self.result = None;
        self.view = ViewMode::Original;
        true
    }

    pub fn fail_decode(&mut self, ticket: DecodeTicket, err: AppError) -> bool {
        if self.pending_decode != Some(ticket) {
            return false;
        }
        self.pending_decode = None;
        log::error!("Failed to read file: {}", err);
        self.report(err);
        true
    }

    /// Marks a request in flight and hands back the payload to send.
    pub fn begin_submit(&mut self) -> Result<ImageUpload, AppError> {
        if self.is_loading() {
            return Err(ValidationError::RequestInFlight.into());
        }
        let upload = match self.selected.as_ref().map(SelectedImage::to_upload) {
            Some(upload) => upload,
            None => return Err(self.report(ValidationError::NoImageSelected.into())),
        };

        self.request = RequestState::InFlight;
        self.submitted_generation = Some(self.image_generation);
        log::info!("Submitting {} ({} bytes)", upload.file_name, upload.bytes.len());
        Ok(upload)
    }

    /// Completes the outstanding request. The in-flight flag is cleared on
    /// every path and every path raises exactly one toast; a failure leaves
    /// the previous result in place.
    pub fn finish_submit(&mut self, outcome: Result<R, AppError>) -> bool {
        if !self.is_loading() {
            log::warn!("Ignoring a response with no request in flight");
            return false;
        }
        self.request = RequestState::Idle;
        let submitted = self.submitted_generation.take();

        match outcome {
            Ok(result) if submitted == Some(self.image_generation) => {
                self.result = Some(result);
                self.notifications.success(SUCCESS_MESSAGE);
            }
            Ok(_) => {
                log::warn!("Discarding a result for an image that is no longer selected");
                self.notifications.error(IMAGE_CHANGED_MESSAGE);
            }
            Err(err) => {
                log::error!("Analysis failed: {}", err);
                self.report(err);
            }
        }
        true
    }

    /// Switches the rendered image. `Result` is refused while no result exists.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if mode == ViewMode::Result && self.result.is_none() {
            return false;
        }
        let changed = self.view != mode;
        self.view = mode;
        changed
    }

    fn report(&mut self, err: AppError) -> AppError {
        self.notifications.error(err.user_message());
        err
    }
}

impl<R: Deref<Target = str>> AppState<R> {
    /// `src` of the image currently on screen.
    pub fn rendered_source(&self) -> Option<&str> {
        match (self.view, &self.result) {
            (ViewMode::Result, Some(result)) => Some(&**result),
            _ => self.selected.as_ref().map(|image| image.preview.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SaliencyClient;
    use crate::client::mock::MockClient;
    use crate::models::{DataUrl, SaliencyImage};
    use crate::notification::NotificationKind;
    use futures::executor::block_on;
    use strum::IntoEnumIterator;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    type State = AppState<String>;

    fn display(image: SaliencyImage) -> String {
        let media_type = image.content_type.as_deref().unwrap_or("application/octet-stream");
        DataUrl::encode(media_type, &image.bytes).to_string()
    }

    fn with_image(name: &str, bytes: &[u8]) -> State {
        let mut state = State::new();
        let ticket = state.select_file(name, "image/png").unwrap();
        assert!(state.finish_decode(ticket, SelectedImage::from_bytes(name, "image/png", bytes.to_vec())));
        state
    }

    fn try_submit(state: &mut State, client: &MockClient) -> Result<(), AppError> {
        let upload = state.begin_submit()?;
        assert!(state.is_loading());
        let outcome = block_on(client.analyze(upload)).map(display);
        state.finish_submit(outcome);
        Ok(())
    }

    fn submit(state: &mut State, client: &MockClient) {
        try_submit(state, client).unwrap();
    }

    #[test]
    fn photo_png_round_trip() {
        let mut state = with_image("photo.png", PNG_BYTES);
        assert!(state.selected().is_some());
        assert!(state.notifications().is_empty());

        let client = MockClient::replying(b"<PNG-bytes>");
        submit(&mut state, &client);

        assert_eq!(client.request_count(), 1);
        let sent = &client.requests.borrow()[0];
        assert_eq!(sent.file_name, "photo.png");
        assert_eq!(sent.bytes, PNG_BYTES);

        let expected = DataUrl::encode("image/png", b"<PNG-bytes>").to_string();
        assert_eq!(state.result(), Some(&expected));
        assert_eq!(state.notifications().count(NotificationKind::Success), 1);
        assert_eq!(state.notifications().len(), 1);
        assert_eq!(state.request_state(), RequestState::Idle);
    }

    #[test]
    fn document_pdf_is_rejected() {
        let mut state = State::new();
        let before = state.clone();

        let err = state.select_file("document.pdf", "application/pdf").unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::UnsupportedFileType(_))));
        assert!(state.selected().is_none());
        assert!(!state.is_decoding());

        let toasts: Vec<_> = state.notifications().iter().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert!(toasts[0].message.contains("image file"));

        assert_eq!(state.selected(), before.selected());
        assert_eq!(state.result(), before.result());
    }

    #[test]
    fn rejected_file_keeps_existing_image_and_result() {
        let mut state = with_image("photo.png", PNG_BYTES);
        submit(&mut state, &MockClient::replying(b"map"));
        let image = state.selected().cloned();
        let result = state.result().cloned();

        for media_type in ["application/pdf", "text/plain", "", "video/mp4"] {
            assert!(state.select_file("x", media_type).is_err());
        }
        assert_eq!(state.selected().cloned(), image);
        assert_eq!(state.result().cloned(), result);
        assert_eq!(state.notifications().count(NotificationKind::Error), 4);
    }

    #[test]
    fn new_image_clears_previous_result() {
        let mut state = with_image("a.png", PNG_BYTES);
        submit(&mut state, &MockClient::replying(b"map"));
        assert!(state.set_view_mode(ViewMode::Result));

        let ticket = state.select_file("b.jpg", "image/jpeg").unwrap();
        // Result stays until the new file is actually decoded.
        assert!(state.result().is_some());
        state.finish_decode(ticket, SelectedImage::from_bytes("b.jpg", "image/jpeg", vec![0xff, 0xd8]));

        assert!(state.result().is_none());
        assert_eq!(state.view_mode(), ViewMode::Original);
        let preview = state.rendered_source().unwrap();
        assert!(preview.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn stale_decode_is_ignored() {
        let mut state = State::new();
        let first = state.select_file("slow.png", "image/png").unwrap();
        let second = state.select_file("fast.png", "image/png").unwrap();

        assert!(state.finish_decode(second, SelectedImage::from_bytes("fast.png", "image/png", vec![1])));
        assert!(!state.finish_decode(first, SelectedImage::from_bytes("slow.png", "image/png", vec![2])));
        assert_eq!(state.selected().unwrap().file_name, "fast.png");
    }

    #[test]
    fn failed_decode_reports_once() {
        let mut state = State::new();
        let ticket = state.select_file("broken.png", "image/png").unwrap();
        assert!(state.fail_decode(ticket, AppError::FileRead("NotReadableError".into())));
        assert!(!state.is_decoding());
        assert!(state.selected().is_none());
        assert_eq!(state.notifications().count(NotificationKind::Error), 1);
    }

    #[test]
    fn submit_without_image_sends_nothing() {
        let mut state = State::new();
        let client = MockClient::replying(b"map");

        let err = try_submit(&mut state, &client).unwrap_err();
        assert_eq!(err, AppError::Validation(ValidationError::NoImageSelected));
        assert_eq!(client.request_count(), 0);
        assert_eq!(state.request_state(), RequestState::Idle);
        assert_eq!(state.notifications().count(NotificationKind::Error), 1);
        assert_eq!(state.notifications().len(), 1);
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut state = with_image("photo.png", PNG_BYTES);
        assert!(state.can_submit());
        let _upload = state.begin_submit().unwrap();
        assert!(!state.can_submit());
        assert_eq!(
            state.begin_submit().unwrap_err(),
            AppError::Validation(ValidationError::RequestInFlight)
        );
    }

    #[test]
    fn server_failure_keeps_prior_result_and_uses_detail() {
        let mut state = with_image("photo.png", PNG_BYTES);
        submit(&mut state, &MockClient::replying(b"first map"));
        let prior = state.result().cloned();

        let client = MockClient::failing(AppError::from_response(
            400,
            br#"{"detail":"Failed to decode image. Please check the file."}"#,
        ));
        submit(&mut state, &client);

        assert_eq!(client.request_count(), 1);
        assert_eq!(state.result().cloned(), prior);
        assert_eq!(state.request_state(), RequestState::Idle);
        let errors: Vec<_> = state
            .notifications()
            .iter()
            .filter(|n| n.kind == NotificationKind::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Failed to decode image. Please check the file.");
    }

    #[test]
    fn network_failure_uses_generic_message() {
        let mut state = with_image("photo.png", PNG_BYTES);
        let client = MockClient::failing(AppError::Network("connection refused".into()));
        submit(&mut state, &client);

        assert!(state.result().is_none());
        assert!(!state.is_loading());
        let toasts: Vec<_> = state.notifications().iter().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Error processing image");
    }

    #[test]
    fn result_for_replaced_image_is_discarded_with_one_toast() {
        let mut state = with_image("a.png", PNG_BYTES);
        let _upload = state.begin_submit().unwrap();

        let ticket = state.select_file("b.png", "image/png").unwrap();
        state.finish_decode(ticket, SelectedImage::from_bytes("b.png", "image/png", vec![9]));
        assert!(state.finish_submit(Ok("blob:a".to_string())));

        assert!(state.result().is_none());
        assert!(!state.is_loading());
        let toasts: Vec<_> = state.notifications().iter().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Error);
        assert_eq!(toasts[0].message, IMAGE_CHANGED_MESSAGE);
    }

    #[test]
    fn stray_response_is_ignored() {
        let mut state = with_image("a.png", PNG_BYTES);
        assert!(!state.finish_submit(Ok("blob:x".to_string())));
        assert!(state.result().is_none());
    }

    #[test]
    fn result_view_unreachable_without_result() {
        let mut state = with_image("a.png", PNG_BYTES);
        assert!(!state.set_view_mode(ViewMode::Result));
        assert_eq!(state.view_mode(), ViewMode::Original);
    }

    #[test]
    fn success_does_not_force_view_mode() {
        let mut state = with_image("a.png", PNG_BYTES);
        let client = MockClient::replying(b"one");
        submit(&mut state, &client);
        state.set_view_mode(ViewMode::Result);

        submit(&mut state, &MockClient::replying(b"two"));
        assert_eq!(state.view_mode(), ViewMode::Result);
        let expected = DataUrl::encode("image/png", b"two").to_string();
        assert_eq!(state.rendered_source(), Some(expected.as_str()));
    }

    #[test]
    fn view_toggle_is_idempotent_and_side_effect_free() {
        let mut state = with_image("a.png", PNG_BYTES);
        submit(&mut state, &MockClient::replying(b"map"));
        let toasts = state.notifications().len();

        for mode in ViewMode::iter() {
            state.set_view_mode(mode);
            let once = state.rendered_source().map(str::to_owned);
            let snapshot = state.clone();
            assert!(!state.set_view_mode(mode));
            assert_eq!(state.rendered_source().map(str::to_owned), once);
            assert_eq!(state, snapshot);
        }
        assert_eq!(state.notifications().len(), toasts);
        assert!(!state.is_loading());

        state.set_view_mode(ViewMode::Original);
        assert_eq!(state.rendered_source(), Some(state.selected().unwrap().preview.as_str()));
        state.set_view_mode(ViewMode::Result);
        assert_eq!(state.rendered_source(), state.result().map(String::as_str));
    }

    #[test]
    fn notifications_can_be_dismissed() {
        let mut state = State::new();
        let _ = state.begin_submit();
        let id = state.notifications().iter().next().unwrap().id;
        assert!(state.dismiss_notification(id));
        assert!(state.notifications().is_empty());
    }
}
