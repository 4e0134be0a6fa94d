//! Todos Frontend App
//!
//! Root component: header, list, footer and the error banner.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ErrorNotification, Footer, Header, TodoList};
use crate::config::ApiConfig;
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(ApiConfig::from_build_env());
    provide_context(ctx);
    let todos = ctx.todos;

    // Load todos on mount
    Effect::new(move |_| {
        spawn_local(async move {
            todos.load().await;
        });
    });

    view! {
        <div class="todoapp">
            <h1 class="todoapp__title">"todos"</h1>

            <div class="todoapp__content">
                <Header />

                <TodoList />

                <Show when=move || todos.with(|s| !s.todos().is_empty())>
                    <Footer />
                </Show>
            </div>

            <ErrorNotification />
        </div>
    }
}
