//! Todo Service
//!
//! Names the intents on top of the gateway and shapes their payloads.
//! Errors pass through unchanged.

use crate::api::TodoGateway;
use crate::error::GatewayResult;
use crate::models::{NewTodo, Todo, TodoPatch};

pub struct TodoService<G> {
    gateway: G,
}

impl<G: TodoGateway> TodoService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn user_id(&self) -> u32 {
        self.gateway.user_id()
    }

    pub async fn fetch_all(&self) -> GatewayResult<Vec<Todo>> {
        self.gateway.list().await
    }

    pub async fn add(&self, title: &str) -> GatewayResult<Todo> {
        let todo = NewTodo {
            title: title.to_string(),
            user_id: self.gateway.user_id(),
            completed: false,
        };
        self.gateway.create(&todo).await
    }

    pub async fn remove(&self, id: u32) -> GatewayResult<()> {
        self.gateway.remove(id).await
    }

    pub async fn rename_title(&self, id: u32, title: &str) -> GatewayResult<Todo> {
        self.gateway.patch(id, &TodoPatch::title(title)).await
    }

    pub async fn set_completed(&self, id: u32, completed: bool) -> GatewayResult<Todo> {
        self.gateway.patch(id, &TodoPatch::completed(completed)).await
    }
}
