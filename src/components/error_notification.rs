//! Error Notification Component
//!
//! Single-line banner for the current error. Clears itself after `ERROR_DISPLAY_MS`.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::state::ERROR_DISPLAY_MS;

#[component]
pub fn ErrorNotification() -> impl IntoView {
    let todos = use_app_context().todos;
    let active = move || todos.with(|s| s.error());

    // Each new error restarts the timer; an expired timer only clears the error it was started for
    Effect::new(move |_| {
        if let Some(error) = active() {
            spawn_local(async move {
                todos.auto_dismiss(error.seq, TimeoutFuture::new(ERROR_DISPLAY_MS)).await;
            });
        }
    });

    view! {
        <div
            data-cy="ErrorNotification"
            class="notification is-danger is-light has-text-weight-normal"
            class:hidden=move || active().is_none()
        >
            <button
                data-cy="HideErrorButton"
                type="button"
                class="delete"
                on:click=move |_| todos.dismiss_error()
            />
            {move || active().map(|error| error.kind.to_string())}
        </div>
    }
}
