pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;
