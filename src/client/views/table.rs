use crate::client::views::display_date;
use crate::client::views::filter::filter_entities;
use crate::models::Task;

/// Shown in cells whose value is absent.
pub const EMPTY_CELL: &str = "-";

/// One table row; every cell is display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub tags: String,
    pub start_date: String,
    pub due_date: String,
    pub points: String,
}

impl From<&Task> for TableRow {
    fn from(task: &Task) -> Self {
        let cell = |value: Option<String>| value.unwrap_or_else(|| EMPTY_CELL.to_string());
        Self {
            id: task.id,
            title: task.title.clone(),
            description: cell(task.description.clone()),
            status: task.status.to_string(),
            priority: cell(task.priority.map(|p| p.to_string())),
            tags: cell(task.tags.clone()),
            start_date: cell(task.start_date.as_ref().map(display_date)),
            due_date: cell(task.due_date.as_ref().map(display_date)),
            points: cell(task.points.map(|p| p.to_string())),
        }
    }
}

pub fn table_rows(tasks: &[Task], term: &str) -> Vec<TableRow> {
    filter_entities(tasks, term)
        .into_iter()
        .map(TableRow::from)
        .collect()
}
