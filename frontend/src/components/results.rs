use super::super::{Model, Msg};
use shared::ViewMode;
use strum::IntoEnumIterator;
use yew::prelude::*;

/// Original / saliency-map viewer. Only shown once a result exists, so the
/// "Saliency Map" toggle never points at nothing.
pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    if model.state.result().is_none() {
        return html! {};
    }

    let current = model.state.view_mode();
    let source = model.state.rendered_source().unwrap_or_default().to_string();

    html! {
        <div class="card results-container">
            <div class="view-toggle">
                { for ViewMode::iter().map(|mode| html! {
                    <button
                        class={classes!("toggle-btn", (mode == current).then_some("active"))}
                        onclick={ctx.link().callback(move |_| Msg::SetViewMode(mode))}
                    >
                        { mode.label() }
                    </button>
                })}
            </div>
            <div class="result-image">
                <img src={source} alt="Result" />
            </div>
        </div>
    }
}
