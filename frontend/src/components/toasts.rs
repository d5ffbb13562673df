use super::super::{Model, Msg};
use yew::prelude::*;

pub fn render_toasts(model: &Model, ctx: &Context<Model>) -> Html {
    let settings = &model.config.toasts;
    let toasts = model.state.notifications().ordered(settings.newest_on_top);

    html! {
        <div class={classes!("toast-container", settings.position.as_ref().to_string())}>
            { for toasts.into_iter().map(|toast| {
                let id = toast.id;
                html! {
                    <div
                        class={classes!("toast", format!("toast-{}", toast.kind))}
                        key={id.to_string()}
                        role="alert"
                        onclick={ctx.link().callback(move |_| Msg::DismissToast(id))}
                    >
                        { &toast.message }
                    </div>
                }
            })}
        </div>
    }
}
