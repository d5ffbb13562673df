use super::super::{Model, Msg};
use super::utils::display_name;
use gloo_file::File as GlooFile;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let chosen = input.files().and_then(|files| files.item(0)).map(GlooFile::from);

        // Lets the same file be picked again.
        input.set_value("");

        chosen.map(Msg::FileChosen)
    });

    let file_input = model.file_input.clone();
    let open_picker = Callback::from(move |_: MouseEvent| {
        if let Some(input) = file_input.cast::<HtmlInputElement>() {
            input.click();
        }
    });

    html! {
        <div class="upload-section">
            <input
                type="file"
                id="image-upload"
                accept="image/*"
                style="display: none;"
                ref={model.file_input.clone()}
                onchange={handle_change}
            />

            <button id="upload-button" class="pill-btn" onclick={open_picker}>
                <i class="fa-solid fa-image"></i>{" Choose Image"}
            </button>

            {
                if let Some(image) = model.state.selected() {
                    html! {
                        <span class="file-name" title={image.file_name.clone()}>
                            { display_name(&image.file_name, 40) }
                        </span>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
