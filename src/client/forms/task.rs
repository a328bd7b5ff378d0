use chrono::{DateTime, Utc};

use crate::client::api::Api;
use crate::client::error::RequestError;
use crate::client::forms::dates::{parse_edit_date, seed_edit_date};
use crate::client::forms::{dispatch_task_update, FormPhase, Session, Submission, ValidationError};
use crate::client::notify::Notifier;
use crate::models::{Priority, Task, TaskStatus, TaskUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    pub tags: String,
    pub points: String,
    pub start_date: String,
    pub due_date: String,
}

impl Default for TaskFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::ToDo,
            priority: None,
            tags: String::new(),
            points: String::new(),
            start_date: String::new(),
            due_date: String::new(),
        }
    }
}

impl TaskFields {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            priority: task.priority,
            tags: task.tags.clone().unwrap_or_default(),
            points: task.points.map(|p| p.to_string()).unwrap_or_default(),
            start_date: seed_edit_date(task.start_date.as_ref()),
            due_date: seed_edit_date(task.due_date.as_ref()),
        }
    }

    pub fn validate(&self) -> Result<TaskUpdate, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let points = match self.points.trim() {
            "" => None,
            raw => match raw.parse::<i32>() {
                Ok(p) if p >= 0 => Some(p),
                _ => return Err(ValidationError::InvalidPoints(raw.to_string())),
            },
        };

        let start_date = optional_date(&self.start_date, "start date")?;
        let due_date = optional_date(&self.due_date, "due date")?;
        if let (Some(start), Some(due)) = (start_date, due_date) {
            if due < start {
                return Err(ValidationError::DueBeforeStart);
            }
        }

        Ok(TaskUpdate {
            title: title.to_string(),
            description: non_blank(&self.description),
            status: self.status,
            priority: self.priority,
            tags: non_blank(&self.tags),
            points,
            start_date,
            due_date,
        })
    }
}

fn optional_date(
    input: &str,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_edit_date(input)
        .map(Some)
        .ok_or(ValidationError::InvalidDate(field))
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// State of the edit-task modal. Opened by task id, typically from a
/// timeline or board selection.
#[derive(Debug, Default)]
pub struct EditTaskForm {
    session: Session,
    fields: TaskFields,
}

impl EditTaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.session.phase()
    }

    pub fn is_open(&self) -> bool {
        self.phase() != FormPhase::Closed
    }

    pub fn task_id(&self) -> Option<i32> {
        self.session.entity_id()
    }

    pub fn fields(&self) -> &TaskFields {
        &self.fields
    }

    pub fn edit(&mut self, change: impl FnOnce(&mut TaskFields)) {
        if self.phase() == FormPhase::Editing {
            change(&mut self.fields);
        }
    }

    pub fn submit_disabled(&self) -> bool {
        self.phase() != FormPhase::Editing
    }

    pub fn open(&mut self, task_id: i32) {
        self.session.open(task_id);
        self.fields = TaskFields::default();
    }

    pub fn load(&mut self, task: &Task) {
        if self.session.loaded(task.id) {
            self.fields = TaskFields::from_task(task);
        }
    }

    /// Open for `task_id` and fetch it. On a failed fetch the form closes
    /// again and the error is returned.
    pub async fn open_by_id(&mut self, api: &Api, task_id: i32) -> Result<(), RequestError> {
        self.open(task_id);
        match api.get_task(task_id).await {
            Ok(task) => {
                self.load(&task);
                Ok(())
            }
            Err(e) => {
                self.close();
                Err(e)
            }
        }
    }

    pub fn close(&mut self) {
        self.session.close();
        self.fields = TaskFields::default();
    }

    pub fn validate(&self) -> Result<TaskUpdate, ValidationError> {
        self.fields.validate()
    }

    pub fn submit(&mut self) -> Option<Submission<TaskUpdate>> {
        if self.phase() != FormPhase::Editing {
            return None;
        }
        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!("task form not submitted: {e}");
                return None;
            }
        };
        self.session.begin_submit(payload)
    }

    pub fn complete(
        &mut self,
        submission: &Submission<TaskUpdate>,
        result: &Result<Task, RequestError>,
    ) -> bool {
        match self.session.finish(submission.ticket(), result.is_ok()) {
            Some(true) => {
                self.fields = TaskFields::default();
                true
            }
            Some(false) => true,
            None => false,
        }
    }

    pub async fn submit_via(
        &mut self,
        api: &Api,
        notifier: &Notifier,
    ) -> Option<Result<Task, RequestError>> {
        let submission = self.submit()?;
        let result = dispatch_task_update(api, notifier, &submission).await;
        self.complete(&submission, &result);
        Some(result)
    }
}
