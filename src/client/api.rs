use std::future::Future;
use std::sync::Arc;

use crate::client::backend::{Backend, HttpBackend};
use crate::client::cache::{QueryCache, QueryKey, Tag};
use crate::client::error::RequestError;
use crate::models::{Project, ProjectUpdate, Task, TaskUpdate, Team, User};

/// Cached queries and invalidating mutations over a [`Backend`].
///
/// Queries are idempotent and served from the cache when possible.
/// Mutations go straight to the backend exactly once; on success they
/// invalidate every cached query tagged with the mutated entity type before
/// returning, so any query issued afterwards refetches.
pub struct Api {
    backend: Arc<dyn Backend>,
    cache: QueryCache,
}

impl Api {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            cache: QueryCache::new(),
        }
    }

    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpBackend::new(base_url)))
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, RequestError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RequestError>>,
    {
        if let Some(hit) = self.cache.get::<T>(&key) {
            tracing::debug!(?key, "query cache hit");
            return Ok(hit);
        }

        let generation = self.cache.generation(key.tag());
        tracing::debug!(?key, "query cache miss, fetching");
        let value = fetch().await?;

        if !self.cache.insert_if_current(key, value.clone(), generation) {
            tracing::debug!(?key, "tag invalidated during fetch, result not cached");
        }
        Ok(value)
    }

    pub async fn get_users(&self) -> Result<Vec<User>, RequestError> {
        self.query(QueryKey::Users, || self.backend.list_users()).await
    }

    pub async fn get_teams(&self) -> Result<Vec<Team>, RequestError> {
        self.query(QueryKey::Teams, || self.backend.list_teams()).await
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>, RequestError> {
        self.query(QueryKey::Projects, || self.backend.list_projects())
            .await
    }

    pub async fn get_project(&self, id: i32) -> Result<Project, RequestError> {
        self.query(QueryKey::Project(id), || self.backend.get_project(id))
            .await
    }

    pub async fn get_tasks(&self, project_id: i32) -> Result<Vec<Task>, RequestError> {
        self.query(QueryKey::Tasks { project_id }, || {
            self.backend.list_tasks(project_id)
        })
        .await
    }

    pub async fn get_task(&self, id: i32) -> Result<Task, RequestError> {
        self.query(QueryKey::Task(id), || self.backend.get_task(id))
            .await
    }

    pub async fn update_project(
        &self,
        id: i32,
        update: &ProjectUpdate,
    ) -> Result<Project, RequestError> {
        let result = self.backend.update_project(id, update).await;
        self.after_mutation(Tag::Projects, &result);
        result
    }

    pub async fn update_task(&self, id: i32, update: &TaskUpdate) -> Result<Task, RequestError> {
        let result = self.backend.update_task(id, update).await;
        self.after_mutation(Tag::Tasks, &result);
        result
    }

    fn after_mutation<T>(&self, tag: Tag, result: &Result<T, RequestError>) {
        match result {
            Ok(_) => {
                let dropped = self.cache.invalidate(tag);
                tracing::debug!(?tag, dropped, "mutation succeeded, cache invalidated");
            }
            Err(e) => tracing::warn!(?tag, "mutation failed: {e}"),
        }
    }
}
