use sqlx::PgPool;

use crate::models::User;

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, profile_picture_url, team_id FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await
}
