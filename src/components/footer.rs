//! Footer Component
//!
//! Active counter, filter tabs and clear-completed.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::Filter;

#[component]
pub fn Footer() -> impl IntoView {
    let todos = use_app_context().todos;

    let items_left = move || {
        let count = todos.with(|s| s.active_count());
        format!("{} {} left", count, if count == 1 { "item" } else { "items" })
    };

    view! {
        <footer class="todoapp__footer" data-cy="Footer">
            <span class="todo-count" data-cy="TodosCounter">{items_left}</span>

            <nav class="filter" data-cy="Filter">
                {Filter::ALL.into_iter().map(|filter| view! {
                    <a
                        href=filter.href()
                        class="filter__link"
                        class:selected=move || todos.with(|s| s.filter()) == filter
                        data-cy=format!("FilterLink{}", filter.label())
                        on:click=move |_| todos.set_filter(filter)
                    >
                        {filter.label()}
                    </a>
                }).collect_view()}
            </nav>

            <button
                type="button"
                class="todoapp__clear-completed"
                data-cy="ClearCompletedButton"
                disabled=move || !todos.with(|s| s.has_completed())
                on:click=move |_| spawn_local(async move { todos.clear_completed().await })
            >
                "Clear completed"
            </button>
        </footer>
    }
}
