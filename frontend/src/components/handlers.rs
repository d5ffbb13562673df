use super::super::{Model, Msg};
use gloo_file::{Blob, File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use shared::{AppError, SaliencyClient, SaliencyImage, SelectedImage};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub fn handle_file_chosen(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let file_name = file.name();
    let media_type = file.raw_mime_type();

    match model.state.select_file(&file_name, &media_type) {
        Ok(ticket) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                match gloo_file::futures::read_as_bytes(&file).await {
                    Ok(bytes) => link.send_message(Msg::FileDecoded(
                        ticket,
                        SelectedImage::from_bytes(file_name, media_type, bytes),
                    )),
                    Err(e) => link.send_message(Msg::FileReadFailed(ticket, e.to_string())),
                }
            });
        }
        Err(e) => log::warn!("File rejected: {}", e),
    }

    true
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    match model.state.begin_submit() {
        Ok(upload) => {
            let client = model.client.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = client.analyze(upload).await;
                link.send_message(Msg::AnalysisFinished(outcome));
            });
        }
        Err(e) => log::warn!("Submit refused: {}", e),
    }

    true
}

pub fn handle_analysis_finished(
    model: &mut Model,
    outcome: Result<SaliencyImage, AppError>,
) -> bool {
    let outcome = outcome.map(|image| {
        let blob = Blob::new_with_options(image.bytes.as_slice(), image.content_type.as_deref());
        ObjectUrl::from(blob)
    });
    model.state.finish_submit(outcome)
}

/// Starts an auto-close timer for every toast that lacks one and drops
/// timers of toasts that are gone.
pub fn schedule_toast_timers(model: &mut Model, ctx: &Context<Model>) {
    let live: Vec<_> = model.state.notifications().iter().map(|n| n.id).collect();
    model.toast_timers.retain(|id, _| live.contains(id));

    let auto_close_ms = model.config.toasts.auto_close_ms;
    for id in live {
        model.toast_timers.entry(id).or_insert_with(|| {
            let link = ctx.link().clone();
            Timeout::new(auto_close_ms, move || link.send_message(Msg::DismissToast(id)))
        });
    }
}
