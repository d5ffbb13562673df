use super::super::{Model, Msg};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div id="preview-container">
            { render_selected_image_preview(model) }
            <div class="button-container">
                <button
                    class={classes!("pill-btn", model.state.is_loading().then_some("busy"))}
                    onclick={debounce(300, move || link.send_message(Msg::Submit))}
                    disabled={!model.state.can_submit()}
                >
                    { render_submit_button_content(model) }
                </button>
            </div>
        </div>
    }
}

fn render_selected_image_preview(model: &Model) -> Html {
    if model.state.is_decoding() {
        return html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p>{"Loading preview..."}</p>
            </div>
        };
    }

    match model.state.selected() {
        Some(image) => html! {
            <img id="actual-image-preview" src={image.preview.to_string()} alt="Preview" />
        },
        None => html! {},
    }
}

fn render_submit_button_content(model: &Model) -> Html {
    if model.state.is_loading() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</> }
    } else {
        html! { <>{"Check Attention"}</> }
    }
}
