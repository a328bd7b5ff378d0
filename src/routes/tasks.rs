use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::models::{Task, TaskUpdate};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub project_id: i32,
}

pub async fn list_by_project(
    State(state): State<SharedState>,
    QueryParams(query): QueryParams<TaskListQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = db::tasks::list_by_project(&state.pool, query.project_id).await?;
    Ok(Json(tasks))
}

pub async fn get(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Task>, AppError> {
    let task = db::tasks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;
    Ok(Json(task))
}

pub async fn update(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i32>,
    JsonBody(req): JsonBody<TaskUpdate>,
) -> Result<Json<Task>, AppError> {
    let task = db::tasks::update(&state.pool, id, &req)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Task not found".to_string()),
            _ => AppError::Database(e),
        })?;

    tracing::info!(task_id = task.id, "task updated");
    Ok(Json(task))
}
