use chrono::{DateTime, Utc};

use crate::client::views::filter::filter_entities;
use crate::models::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
        }
    }

    /// Chart column width in pixels.
    pub fn column_width(&self) -> u32 {
        match self {
            ViewMode::Month => 150,
            ViewMode::Day | ViewMode::Week => 100,
        }
    }
}

/// Heuristic for the progress shown on a timeline bar.
///
/// Completed tasks read 100. Otherwise `points` are scaled so that
/// `full_points` reads 100, clamped to 0..=100; tasks without points read
/// `default_progress`. This is a display approximation, not a business rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRule {
    pub full_points: f64,
    pub default_progress: u8,
}

impl Default for ProgressRule {
    fn default() -> Self {
        Self {
            full_points: 10.0,
            default_progress: 50,
        }
    }
}

impl ProgressRule {
    pub fn progress(&self, task: &Task) -> u8 {
        if task.status == TaskStatus::Completed {
            return 100;
        }
        match task.points {
            Some(points) if self.full_points > 0.0 => {
                (f64::from(points) * 100.0 / self.full_points)
                    .round()
                    .clamp(0.0, 100.0) as u8
            }
            Some(_) => 0,
            None => self.default_progress.min(100),
        }
    }
}

/// Bar types the Gantt chart accepts. Bars built from tasks are always
/// `Task`; the other kinds are part of the chart's input shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Task,
    Milestone,
    Project,
}

/// One bar of the Gantt chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttBar {
    /// The task id, as the chart library identifies bars by string.
    pub id: String,
    pub name: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub kind: BarKind,
    pub progress: u8,
    pub is_disabled: bool,
}

impl GanttBar {
    pub fn from_task(task: &Task, rule: &ProgressRule) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.title.clone(),
            start: task.start_date,
            end: task.due_date,
            kind: BarKind::Task,
            progress: rule.progress(task),
            is_disabled: false,
        }
    }

    /// A bar with a missing or inverted date range still renders, as an
    /// invalid bar.
    pub fn is_valid(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start <= end)
    }

    pub fn task_id(&self) -> Option<i32> {
        self.id.parse().ok()
    }
}

pub fn gantt_bars(tasks: &[Task], term: &str, rule: &ProgressRule) -> Vec<GanttBar> {
    filter_entities(tasks, term)
        .into_iter()
        .map(|task| GanttBar::from_task(task, rule))
        .collect()
}

/// Timeline tab state: display mode and the task whose edit modal is open.
#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    view_mode: ViewMode,
    selected_task_id: Option<i32>,
    progress: ProgressRule,
}

impl TimelineView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress_rule(progress: ProgressRule) -> Self {
        Self {
            progress,
            ..Self::default()
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn column_width(&self) -> u32 {
        self.view_mode.column_width()
    }

    pub fn bars(&self, tasks: &[Task], term: &str) -> Vec<GanttBar> {
        gantt_bars(tasks, term, &self.progress)
    }

    pub fn selected_task_id(&self) -> Option<i32> {
        self.selected_task_id
    }

    pub fn select_task(&mut self, task_id: i32) {
        self.selected_task_id = Some(task_id);
    }

    /// Select the task behind a clicked bar. Returns the task id to open.
    pub fn select_bar(&mut self, bar: &GanttBar) -> Option<i32> {
        let task_id = bar.task_id()?;
        self.select_task(task_id);
        Some(task_id)
    }

    pub fn clear_selection(&mut self) {
        self.selected_task_id = None;
    }

    pub fn empty_message(term: &str) -> &'static str {
        if term.is_empty() {
            "No tasks to display in the timeline."
        } else {
            "No tasks match your search."
        }
    }
}
