//! Todo List Component
//!
//! Filtered todos followed by the placeholder of an in-flight add.

use leptos::prelude::*;

use crate::components::TodoItem;
use crate::context::use_app_context;

#[component]
pub fn TodoList() -> impl IntoView {
    let todos = use_app_context().todos;

    view! {
        <section class="todoapp__main" data-cy="TodoList">
            <For
                each=move || todos.with(|s| s.visible_todos())
                // Rows read their fields from the state, so an echo never rebuilds an open editor
                key=|todo| todo.id
                children=move |todo| view! { <TodoItem todo=todo /> }
            />

            {move || todos.with(|s| s.placeholder().cloned()).map(|todo| view! { <TodoItem todo=todo /> })}
        </section>
    }
}
