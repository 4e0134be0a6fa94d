//! Application Context
//!
//! The todo controller, shared with every component via Leptos Context API.

use leptos::prelude::*;

use crate::api::HttpGateway;
use crate::config::ApiConfig;
use crate::controller::TodoController;
use crate::service::TodoService;

pub type AppController = TodoController<HttpGateway>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Sole owner of the todo list; components only call its intents
    pub todos: AppController,
}

impl AppContext {
    pub fn new(config: ApiConfig) -> Self {
        let service = TodoService::new(HttpGateway::new(config));
        Self { todos: TodoController::new(service) }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
