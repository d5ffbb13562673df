mod api;
mod components;

use api::GlooSaliencyClient;
use components::handlers;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use shared::{AppError, AppState, ClientConfig, DecodeTicket, SaliencyImage, SelectedImage, Uuid, ViewMode};
use std::collections::HashMap;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // File operations
    FileChosen(GlooFile),
    FileDecoded(DecodeTicket, SelectedImage),
    FileReadFailed(DecodeTicket, String),

    // Analysis operations
    Submit,
    AnalysisFinished(Result<SaliencyImage, AppError>),

    // UI states
    SetViewMode(ViewMode),
    DismissToast(Uuid),
}

// Main component
pub struct Model {
    state: AppState<ObjectUrl>,
    config: ClientConfig,
    client: GlooSaliencyClient,
    file_input: NodeRef,
    toast_timers: HashMap<Uuid, Timeout>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = ClientConfig::load(
            include_str!("../../config/client.yaml"),
            option_env!("SALIENCY_API_URL"),
        );
        log::info!("Saliency endpoint: {}", config.api.endpoint);

        Self {
            state: AppState::new(),
            client: GlooSaliencyClient::new(&config.api),
            config,
            file_input: NodeRef::default(),
            toast_timers: HashMap::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let render = match msg {
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, ctx, file),
            Msg::FileDecoded(ticket, image) => self.state.finish_decode(ticket, image),
            Msg::FileReadFailed(ticket, reason) => {
                self.state.fail_decode(ticket, AppError::FileRead(reason))
            }

            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::AnalysisFinished(outcome) => handlers::handle_analysis_finished(self, outcome),

            Msg::SetViewMode(mode) => self.state.set_view_mode(mode),
            Msg::DismissToast(id) => {
                self.toast_timers.remove(&id);
                self.state.dismiss_notification(id)
            }
        };

        handlers::schedule_toast_timers(self, ctx);
        render
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="app">
                { components::header::render_header() }

                <main class="main-content">
                    <div class="card">
                        { components::upload_section::render_upload_section(self, ctx) }
                        { components::preview_area::render_preview_area(self, ctx) }
                    </div>
                    { components::results::render_results(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{ format!("© {} Attention Checker", components::utils::current_year()) }</p>
                </footer>

                { components::toasts::render_toasts(self, ctx) }
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
