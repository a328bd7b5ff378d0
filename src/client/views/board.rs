use crate::client::views::filter::filter_entities;
use crate::client::views::list::TaskCard;
use crate::models::{Task, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub cards: Vec<TaskCard>,
}

/// One column per status in [`TaskStatus::ALL`] order, empty columns included.
pub fn board_columns(tasks: &[Task], term: &str) -> Vec<BoardColumn> {
    let matching = filter_entities(tasks, term);
    TaskStatus::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            cards: matching
                .iter()
                .filter(|task| task.status == status)
                .map(|task| TaskCard::from(*task))
                .collect(),
        })
        .collect()
}
