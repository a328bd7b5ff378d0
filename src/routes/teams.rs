use axum::extract::State;
use axum::Json;

use crate::db;
use crate::error::AppError;
use crate::models::Team;
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Team>>, AppError> {
    let teams = db::teams::list_all(&state.pool).await?;
    Ok(Json(teams))
}
