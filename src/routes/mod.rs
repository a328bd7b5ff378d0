pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/users", get(users::list))
        .route("/teams", get(teams::list))
        // Projects
        .route("/projects", get(projects::list))
        .route(
            "/projects/{id}",
            get(projects::get)
                .patch(projects::update)
                .put(projects::update),
        )
        // Tasks
        .route("/tasks", get(tasks::list_by_project))
        .route("/tasks/{id}", get(tasks::get).patch(tasks::update))
}
