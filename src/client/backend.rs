use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::error::RequestError;
use crate::models::{Project, ProjectUpdate, Task, TaskUpdate, Team, User};

/// Source of entities for the client. [`HttpBackend`] talks to the REST API;
/// anything else (fixtures, an offline store) can stand in for it.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, RequestError>;
    async fn list_teams(&self) -> Result<Vec<Team>, RequestError>;
    async fn list_projects(&self) -> Result<Vec<Project>, RequestError>;
    async fn get_project(&self, id: i32) -> Result<Project, RequestError>;
    async fn list_tasks(&self, project_id: i32) -> Result<Vec<Task>, RequestError>;
    async fn get_task(&self, id: i32) -> Result<Task, RequestError>;
    async fn update_project(
        &self,
        id: i32,
        update: &ProjectUpdate,
    ) -> Result<Project, RequestError>;
    async fn update_task(&self, id: i32, update: &TaskUpdate) -> Result<Task, RequestError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`Backend`] over the JSON API served by [`crate::build_app`].
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// * `base_url` - API root, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse_response(response).await
    }

    /// Map non-2xx responses to [`RequestError::Status`], keeping the
    /// server's `error` message when the body carries one.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RequestError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            };
            return Err(RequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_users(&self) -> Result<Vec<User>, RequestError> {
        self.get_json("/users").await
    }

    async fn list_teams(&self) -> Result<Vec<Team>, RequestError> {
        self.get_json("/teams").await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, RequestError> {
        self.get_json("/projects").await
    }

    async fn get_project(&self, id: i32) -> Result<Project, RequestError> {
        self.get_json(&format!("/projects/{id}")).await
    }

    async fn list_tasks(&self, project_id: i32) -> Result<Vec<Task>, RequestError> {
        let response = self
            .client
            .get(self.url("/tasks"))
            .query(&[("projectId", project_id)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_task(&self, id: i32) -> Result<Task, RequestError> {
        self.get_json(&format!("/tasks/{id}")).await
    }

    async fn update_project(
        &self,
        id: i32,
        update: &ProjectUpdate,
    ) -> Result<Project, RequestError> {
        let response = self
            .client
            .patch(self.url(&format!("/projects/{id}")))
            .json(update)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_task(&self, id: i32, update: &TaskUpdate) -> Result<Task, RequestError> {
        let response = self
            .client
            .patch(self.url(&format!("/tasks/{id}")))
            .json(update)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
