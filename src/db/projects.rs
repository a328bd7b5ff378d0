use sqlx::PgPool;

use crate::models::{Project, ProjectUpdate};

const COLUMNS: &str = "id, name, description, start_date, end_date, team_id, version";

pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!("SELECT {COLUMNS} FROM projects ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!("SELECT {COLUMNS} FROM projects WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns `RowNotFound` when no project has this id.
pub async fn update(
    pool: &PgPool,
    id: i32,
    update: &ProjectUpdate,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        "UPDATE projects
         SET name = $2, description = $3, start_date = $4, end_date = $5, team_id = $6
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(&update.name)
    .bind(&update.description)
    .bind(update.start_date)
    .bind(update.end_date)
    .bind(update.team_id)
    .fetch_one(pool)
    .await
}
