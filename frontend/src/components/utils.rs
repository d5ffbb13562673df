use gloo_timers::callback::Timeout;
use js_sys::Date;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));

    Callback::from(move |_| {
        let mut timeout_ref = timeout.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        *timeout_ref = Some(Timeout::new(duration, move || {
            inner_callback();
        }));
    })
}

pub fn current_year() -> u32 {
    Date::new_0().get_full_year()
}

/// Shortens long file names for button labels.
pub fn display_name(file_name: &str, max_chars: usize) -> String {
    if file_name.chars().count() > max_chars {
        let head: String = file_name.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        file_name.to_string()
    }
}
