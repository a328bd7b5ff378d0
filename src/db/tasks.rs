use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{Priority, Task, TaskStatus, TaskUpdate};

const COLUMNS: &str =
    "id, title, description, status, priority, tags, points, start_date, due_date, project_id";

/// Row as stored; status and priority are TEXT columns.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i32,
    title: String,
    description: Option<String>,
    status: String,
    priority: Option<String>,
    tags: Option<String>,
    points: Option<i32>,
    start_date: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    project_id: i32,
}

impl TryFrom<TaskRow> for Task {
    type Error = sqlx::Error;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_str_db(&row.status).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown task status '{}'", row.status).into())
        })?;
        let priority = match row.priority {
            Some(p) => Some(Priority::from_str_db(&p).ok_or_else(|| {
                sqlx::Error::Decode(format!("unknown task priority '{p}'").into())
            })?),
            None => None,
        };

        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            priority,
            tags: row.tags,
            points: row.points,
            start_date: row.start_date,
            due_date: row.due_date,
            project_id: row.project_id,
        })
    }
}

pub async fn list_by_project(pool: &PgPool, project_id: i32) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, TaskRow>(&format!(
        "SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY id"
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(Task::try_from)
    .collect()
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, TaskRow>(&format!("SELECT {COLUMNS} FROM tasks WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Task::try_from)
        .transpose()
}

/// Returns `RowNotFound` when no task has this id.
pub async fn update(pool: &PgPool, id: i32, update: &TaskUpdate) -> Result<Task, sqlx::Error> {
    let row = sqlx::query_as::<_, TaskRow>(&format!(
        "UPDATE tasks
         SET title = $2, description = $3, status = $4, priority = $5, tags = $6,
             points = $7, start_date = $8, due_date = $9
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(&update.title)
    .bind(&update.description)
    .bind(update.status.as_str())
    .bind(update.priority.map(|p| p.as_str()))
    .bind(&update.tags)
    .bind(update.points)
    .bind(update.start_date)
    .bind(update.due_date)
    .fetch_one(pool)
    .await?;

    Task::try_from(row)
}
