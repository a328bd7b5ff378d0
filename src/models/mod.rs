mod project;
mod task;
mod team;
mod user;

pub use project::{Project, ProjectUpdate};
pub use task::{Priority, Task, TaskStatus, TaskUpdate};
pub use team::Team;
pub use user::User;
