use sqlx::PgPool;

use crate::models::Team;

/// All teams, unscoped. Project edit forms offer every team as a choice.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT id, team_name FROM teams ORDER BY team_name, id")
        .fetch_all(pool)
        .await
}
