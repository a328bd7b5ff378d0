use crate::client::views::display_date;
use crate::client::views::filter::filter_entities;
use crate::models::{Priority, Task, TaskStatus};

/// Render-ready task summary shared by the list and board views.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
    pub points: Option<i32>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
}

impl From<&Task> for TaskCard {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            tags: split_tags(task.tags.as_deref()),
            points: task.points,
            start_date: task.start_date.as_ref().map(display_date),
            due_date: task.due_date.as_ref().map(display_date),
        }
    }
}

pub fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn task_cards(tasks: &[Task], term: &str) -> Vec<TaskCard> {
    filter_entities(tasks, term)
        .into_iter()
        .map(TaskCard::from)
        .collect()
}

/// List tab state: which card has its action menu open.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    open_menu_id: Option<i32>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_menu_id(&self) -> Option<i32> {
        self.open_menu_id
    }

    /// Open the menu of `task_id`, or close it if it is already open.
    pub fn toggle_menu(&mut self, task_id: i32) {
        self.open_menu_id = if self.open_menu_id == Some(task_id) {
            None
        } else {
            Some(task_id)
        };
    }

    pub fn cards(&self, tasks: &[Task], term: &str) -> Vec<TaskCard> {
        task_cards(tasks, term)
    }
}
