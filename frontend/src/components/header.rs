use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1>{"Attention Checker"}</h1>
            <p class="subtitle">{"Upload an image to analyze visual attention areas"}</p>
        </header>
    }
}
