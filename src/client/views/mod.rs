//! Pure transforms from entity collections to render-ready sequences.
//!
//! Every view takes the fetched entities and the current search term and
//! derives its output from them alone; the views own no entity data.

pub mod board;
pub mod filter;
pub mod list;
pub mod table;
pub mod timeline;

pub use board::{board_columns, BoardColumn};
pub use filter::{filter_entities, Searchable};
pub use list::{ListView, TaskCard};
pub use table::{table_rows, TableRow};
pub use timeline::{BarKind, GanttBar, ProgressRule, TimelineView, ViewMode};

use chrono::{DateTime, Utc};

use crate::client::error::RequestError;

/// Placeholder text shown while a query is loading or after it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMessages {
    pub loading: &'static str,
    pub error: &'static str,
}

pub const TASK_STATUS_MESSAGES: StatusMessages = StatusMessages {
    loading: "Loading Tasks...",
    error: "An error occurred while fetching tasks.",
};

pub const PROJECT_STATUS_MESSAGES: StatusMessages = StatusMessages {
    loading: "Loading project...",
    error: "An error occurred while fetching the project.",
};

/// Display format for dates on cards and table cells.
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

pub fn display_date(date: &DateTime<Utc>) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Render state of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn from_result(result: Result<T, RequestError>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => {
                tracing::warn!("query failed: {e}");
                Loadable::Failed
            }
        }
    }

    /// Placeholder text for the non-ready states.
    pub fn status_message(&self, messages: &StatusMessages) -> Option<&'static str> {
        match self {
            Loadable::Loading => Some(messages.loading),
            Loadable::Failed => Some(messages.error),
            Loadable::Ready(_) => None,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}
