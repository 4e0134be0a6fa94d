//! Header Component
//!
//! Toggle-all button and the new-todo input.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn Header() -> impl IntoView {
    let todos = use_app_context().todos;

    let (value, set_value) = signal(String::new());
    let input_ref = NodeRef::<html::Input>::new();

    let submitting = move || todos.with(|s| s.is_submitting());
    let show_toggle_all = move || todos.with(|s| !s.is_toggling_all() && !s.todos().is_empty());

    // Keep focus on the input whenever it accepts text
    Effect::new(move |_| {
        if !submitting() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        ev.prevent_default();
        let title = value.get_untracked();
        spawn_local(async move {
            if todos.add(&title).await {
                set_value.set(String::new());
            }
        });
    };

    view! {
        <header class="todoapp__header">
            <Show when=show_toggle_all>
                <button
                    type="button"
                    class="todoapp__toggle-all"
                    class:active=move || todos.with(|s| s.all_completed())
                    data-cy="ToggleAllButton"
                    on:click=move |_| spawn_local(async move { todos.toggle_all().await })
                />
            </Show>

            <form on:submit=|ev: web_sys::SubmitEvent| ev.prevent_default()>
                <input
                    data-cy="NewTodoField"
                    type="text"
                    class="todoapp__new-todo"
                    placeholder="What needs to be done?"
                    node_ref=input_ref
                    disabled=submitting
                    prop:value=move || value.get()
                    on:input=move |ev| set_value.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
            </form>
        </header>
    }
}
