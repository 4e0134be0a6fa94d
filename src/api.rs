//! Remote Todo Gateway
//!
//! One HTTP call per operation against the `/todos` collection. No retries, no caching.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{NewTodo, Todo, TodoPatch};

/// Access to the remote todo collection of a single user.
///
/// Browser futures are not `Send`, hence `?Send`.
#[async_trait(?Send)]
pub trait TodoGateway {
    /// User every request is scoped to
    fn user_id(&self) -> u32;

    async fn list(&self) -> GatewayResult<Vec<Todo>>;

    async fn create(&self, todo: &NewTodo) -> GatewayResult<Todo>;

    async fn remove(&self, id: u32) -> GatewayResult<()>;

    async fn patch(&self, id: u32, patch: &TodoPatch) -> GatewayResult<Todo>;
}

/// `TodoGateway` over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpGateway {
    pub fn new(config: ApiConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.config.base_url)
    }

    fn item_url(&self, id: u32) -> String {
        format!("{}/todos/{}", self.config.base_url, id)
    }

    fn check_status(response: reqwest::Response) -> GatewayResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(GatewayError::Status(status.as_u16()))
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
        let response = Self::check_status(response)?;
        response.json::<T>().await.map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl TodoGateway for HttpGateway {
    fn user_id(&self) -> u32 {
        self.config.user_id
    }

    async fn list(&self) -> GatewayResult<Vec<Todo>> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&[("userId", self.config.user_id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create(&self, todo: &NewTodo) -> GatewayResult<Todo> {
        let response = self.client.post(self.collection_url()).json(todo).send().await?;
        Self::decode(response).await
    }

    async fn remove(&self, id: u32) -> GatewayResult<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        Self::check_status(response).map(|_| ())
    }

    async fn patch(&self, id: u32, patch: &TodoPatch) -> GatewayResult<Todo> {
        let response = self.client.patch(self.item_url(id)).json(patch).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let gateway = HttpGateway::new(ApiConfig::new("http://api.test/", 471));
        assert_eq!(gateway.collection_url(), "http://api.test/todos");
        assert_eq!(gateway.item_url(42), "http://api.test/todos/42");
        assert_eq!(gateway.user_id(), 471);
    }
}
