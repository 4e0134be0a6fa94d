//! Todo Item Component
//!
//! One row: status checkbox, title with inline editing, delete button and loader.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::controller::EditOutcome;
use crate::models::Todo;

#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let todos = use_app_context().todos;

    let id = todo.id;
    let is_placeholder = todo.is_placeholder();

    // The placeholder is not in the list, so it renders from the snapshot it was created with
    let snapshot = StoredValue::new(todo);
    let current = move || todos.with(|s| s.get(id).cloned()).unwrap_or_else(|| snapshot.get_value());

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let input_ref = NodeRef::<html::Input>::new();

    let is_busy = move || is_placeholder || todos.with(|s| s.pending(id).is_some());

    Effect::new(move |_| {
        if editing.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let commit = move || {
        let raw = draft.get_untracked();
        spawn_local(async move {
            if todos.commit_edit(id, &raw).await == EditOutcome::Closed {
                set_editing.set(false);
            }
        });
    };

    let start_editing = move |_: web_sys::MouseEvent| {
        set_draft.set(current().title);
        set_editing.set(true);
    };

    view! {
        <div data-cy="Todo" class="todo" class:completed=move || current().completed>
            <label class="todo__status-label">
                <input
                    data-cy="TodoStatus"
                    type="checkbox"
                    class="todo__status"
                    prop:checked=move || current().completed
                    on:click=move |ev| {
                        // The checkbox shows server state; it flips once the echo lands in the list
                        ev.prevent_default();
                        spawn_local(async move { todos.toggle(id).await });
                    }
                />
            </label>

            {move || if editing.get() {
                view! {
                    <form on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        commit();
                    }>
                        <input
                            data-cy="TodoTitleField"
                            type="text"
                            class="todo__title-field"
                            placeholder="Empty todo will be deleted"
                            node_ref=input_ref
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            on:blur=move |_| {
                                if editing.get_untracked() {
                                    commit();
                                }
                            }
                            on:keyup=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Escape" {
                                    set_editing.set(false);
                                }
                            }
                        />
                    </form>
                }.into_any()
            } else {
                view! {
                    <span data-cy="TodoTitle" class="todo__title" on:dblclick=start_editing>
                        {move || current().title}
                    </span>
                    <button
                        type="button"
                        class="todo__remove"
                        data-cy="TodoDelete"
                        on:click=move |_| spawn_local(async move {
                            todos.delete(id).await;
                        })
                    >
                        "×"
                    </button>
                }.into_any()
            }}

            <div data-cy="TodoLoader" class="modal overlay" class:is-active=is_busy>
                <div class="modal-background has-background-white-ter" />
                <div class="loader" />
            </div>
        </div>
    }
}
