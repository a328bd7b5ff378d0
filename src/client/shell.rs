use std::time::Duration;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::Instant;

use crate::client::api::Api;
use crate::client::forms::{EditProjectForm, EditTaskForm};
use crate::client::notify::{Notification, NotificationKind, Notifier};
use crate::client::views::board::board_columns;
use crate::client::views::table::table_rows;
use crate::client::views::{
    BoardColumn, GanttBar, ListView, Loadable, TableRow, TaskCard, TimelineView,
};
use crate::models::{Project, Task};

pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_VERSION: &str = "No version";

pub const SUCCESS_TOAST_TTL: Duration = Duration::from_secs(2);
pub const ERROR_TOAST_TTL: Duration = Duration::from_secs(4);

/// A notification on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    /// `None` while the operation is still loading.
    pub expires_at: Option<Instant>,
}

impl Toast {
    fn new(notification: Notification, received_at: Instant) -> Self {
        let ttl = match notification.kind {
            NotificationKind::Loading => None,
            NotificationKind::Success => Some(SUCCESS_TOAST_TTL),
            NotificationKind::Error => Some(ERROR_TOAST_TTL),
        };
        Self {
            notification,
            expires_at: ttl.map(|ttl| received_at + ttl),
        }
    }

    pub fn id(&self) -> u64 {
        self.notification.id
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Board,
    List,
    Timeline,
    Table,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Board, Tab::List, Tab::Timeline, Tab::Table];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Board => "Board",
            Tab::List => "List",
            Tab::Timeline => "Timeline",
            Tab::Table => "Table",
        }
    }
}

/// Read-only project metadata shown above the tabs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectHeader {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<i32>,
}

impl ProjectHeader {
    pub fn description_text(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_DESCRIPTION,
        }
    }

    pub fn version_text(&self) -> String {
        match self.version {
            Some(version) => format!("Version {version}"),
            None => NO_VERSION.to_string(),
        }
    }
}

impl From<&Project> for ProjectHeader {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            version: project.version,
        }
    }
}

/// Output of whichever tab is active.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveView {
    Board(Vec<BoardColumn>),
    List(Vec<TaskCard>),
    Timeline(Vec<GanttBar>),
    Table(Vec<TableRow>),
}

/// Project page: tabs, search, modals and the toast feed.
///
/// The page owns which tab is active and which modals are open; tab and
/// modal state are independent of each other. Nothing here persists across
/// page loads.
pub struct ProjectShell {
    project_id: i32,
    active_tab: Tab,
    search_term: String,
    new_project_open: bool,
    new_task_open: bool,
    list: ListView,
    timeline: TimelineView,
    edit_project: EditProjectForm,
    edit_task: EditTaskForm,
    notifications: broadcast::Receiver<Notification>,
    toasts: Vec<Toast>,
}

impl ProjectShell {
    pub fn new(project_id: i32, notifier: &Notifier) -> Self {
        Self {
            project_id,
            active_tab: Tab::default(),
            search_term: String::new(),
            new_project_open: false,
            new_task_open: false,
            list: ListView::new(),
            timeline: TimelineView::new(),
            edit_project: EditProjectForm::new(),
            edit_task: EditTaskForm::new(),
            notifications: notifier.subscribe(),
            toasts: Vec::new(),
        }
    }

    pub fn project_id(&self) -> i32 {
        self.project_id
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn is_new_project_open(&self) -> bool {
        self.new_project_open
    }

    pub fn set_new_project_open(&mut self, open: bool) {
        self.new_project_open = open;
    }

    pub fn is_new_task_open(&self) -> bool {
        self.new_task_open
    }

    pub fn set_new_task_open(&mut self, open: bool) {
        self.new_task_open = open;
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    pub fn timeline(&self) -> &TimelineView {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut TimelineView {
        &mut self.timeline
    }

    pub fn edit_project(&self) -> &EditProjectForm {
        &self.edit_project
    }

    pub fn edit_project_mut(&mut self) -> &mut EditProjectForm {
        &mut self.edit_project
    }

    pub fn edit_task(&self) -> &EditTaskForm {
        &self.edit_task
    }

    pub fn edit_task_mut(&mut self) -> &mut EditTaskForm {
        &mut self.edit_task
    }

    pub async fn load_project(&self, api: &Api) -> Loadable<ProjectHeader> {
        let project = api.get_project(self.project_id).await;
        Loadable::from_result(project.map(|p| ProjectHeader::from(&p)))
    }

    pub async fn load_tasks(&self, api: &Api) -> Loadable<Vec<Task>> {
        Loadable::from_result(api.get_tasks(self.project_id).await)
    }

    /// Derive the active tab's output from `tasks` and the search term.
    pub fn render(&self, tasks: &[Task]) -> ActiveView {
        let term = self.search_term.as_str();
        match self.active_tab {
            Tab::Board => ActiveView::Board(board_columns(tasks, term)),
            Tab::List => ActiveView::List(self.list.cards(tasks, term)),
            Tab::Timeline => ActiveView::Timeline(self.timeline.bars(tasks, term)),
            Tab::Table => ActiveView::Table(table_rows(tasks, term)),
        }
    }

    /// Open the edit-project modal seeded from `project`.
    pub fn open_edit_project(&mut self, project: &Project) {
        self.edit_project.open_with(project);
    }

    /// Select a task on the timeline and open its edit modal by id. The
    /// caller loads the task into [`edit_task_mut`](Self::edit_task_mut).
    pub fn select_timeline_task(&mut self, task_id: i32) {
        self.timeline.select_task(task_id);
        self.edit_task.open(task_id);
    }

    pub fn close_task_modal(&mut self) {
        self.edit_task.close();
        self.timeline.clear_selection();
    }

    /// Drain pending notifications into the toast list, then drop expired
    /// toasts. A notification replaces the toast with the same id. Returns
    /// how many notifications were received.
    pub fn poll_notifications(&mut self) -> usize {
        let now = Instant::now();
        let mut received = 0;
        loop {
            match self.notifications.try_recv() {
                Ok(notification) => {
                    received += 1;
                    let toast = Toast::new(notification, now);
                    match self.toasts.iter_mut().find(|t| t.id() == toast.id()) {
                        Some(existing) => *existing = toast,
                        None => self.toasts.push(toast),
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification feed lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        self.expire(now);
        received
    }

    /// Drop settled toasts whose time is up. Loading toasts stay until
    /// resolved. Returns how many were dropped.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired(now));
        before - self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id() != id);
    }
}
