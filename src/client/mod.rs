//! Client-side view state and data synchronization for the project dashboard.
//!
//! Data flows one way: [`api::Api`] fetches and caches entities, the
//! [`views`] turn them into render-ready sequences, the [`forms`] edit them
//! and push mutations back through the same [`api::Api`], which invalidates
//! whatever it had cached for the affected entity type.

pub mod api;
pub mod backend;
pub mod cache;
pub mod error;
pub mod forms;
pub mod notify;
pub mod shell;
pub mod views;

pub use api::Api;
pub use backend::{Backend, HttpBackend};
pub use error::RequestError;
pub use notify::{Notification, NotificationKind, Notifier};
