use axum::extract::State;
use axum::Json;

use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::{Project, ProjectUpdate};
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = db::projects::list(&state.pool).await?;
    Ok(Json(projects))
}

pub async fn get(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Project>, AppError> {
    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

pub async fn update(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i32>,
    JsonBody(req): JsonBody<ProjectUpdate>,
) -> Result<Json<Project>, AppError> {
    let project = db::projects::update(&state.pool, id, &req)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Project not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest("Team does not exist".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!(project_id = project.id, "project updated");
    Ok(Json(project))
}
