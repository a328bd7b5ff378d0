//! Edit-modal state machines.
//!
//! Every modal moves through `Closed → Loading → Editing → Submitting` and
//! from `Submitting` either back to `Closed` (success) or to `Editing`
//! (failure, fields kept so the user can retry). A submit that fails
//! validation is a no-op. Errors are never stored on the form; the
//! `dispatch_*` helpers report them through the [`Notifier`].

pub mod dates;
pub mod project;
pub mod task;

pub use project::{EditProjectForm, ProjectFields, TeamOptions};
pub use task::{EditTaskForm, TaskFields};

use crate::client::api::Api;
use crate::client::error::RequestError;
use crate::client::notify::{Notifier, TrackMessages};
use crate::models::{Project, ProjectUpdate, Task, TaskUpdate};

pub const PROJECT_UPDATE_MESSAGES: TrackMessages = TrackMessages {
    loading: "Updating project...",
    success: "Project updated successfully!",
    error: "Failed to update project.",
};

pub const TASK_UPDATE_MESSAGES: TrackMessages = TrackMessages {
    loading: "Updating task...",
    success: "Task updated successfully!",
    error: "Failed to update task.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Closed,
    Loading,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    EmptyName,
    #[error("title is required")]
    EmptyTitle,
    #[error("a team must be selected")]
    NoTeamSelected,
    #[error("invalid team id '{0}'")]
    InvalidTeam(String),
    #[error("{0} is required")]
    MissingDate(&'static str),
    #[error("{0} is not a valid date")]
    InvalidDate(&'static str),
    #[error("due date is before start date")]
    DueBeforeStart,
    #[error("points must be a non-negative whole number, got '{0}'")]
    InvalidPoints(String),
}

/// An update accepted by a form and awaiting its mutation result.
///
/// Hand it back to the issuing form's `complete` once the mutation settles.
/// If the form was closed or reopened in the meantime the completion is
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<U> {
    pub id: i32,
    pub payload: U,
    ticket: u64,
}

impl<U> Submission<U> {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// Lifecycle bookkeeping shared by the edit forms.
#[derive(Debug, Default)]
pub(crate) struct Session {
    phase: FormPhase,
    entity_id: Option<i32>,
    /// Advanced on every open and close; stale submissions carry an older value.
    counter: u64,
}

impl Session {
    pub(crate) fn phase(&self) -> FormPhase {
        self.phase
    }

    pub(crate) fn entity_id(&self) -> Option<i32> {
        self.entity_id
    }

    pub(crate) fn open(&mut self, id: i32) {
        self.counter += 1;
        self.phase = FormPhase::Loading;
        self.entity_id = Some(id);
    }

    /// Loading → Editing, only for the entity being waited on.
    pub(crate) fn loaded(&mut self, id: i32) -> bool {
        if self.phase == FormPhase::Loading && self.entity_id == Some(id) {
            self.phase = FormPhase::Editing;
            true
        } else {
            false
        }
    }

    pub(crate) fn close(&mut self) {
        self.counter += 1;
        self.phase = FormPhase::Closed;
        self.entity_id = None;
    }

    pub(crate) fn begin_submit<U>(&mut self, payload: U) -> Option<Submission<U>> {
        let id = self.entity_id?;
        if self.phase != FormPhase::Editing {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(Submission {
            id,
            payload,
            ticket: self.counter,
        })
    }

    /// Returns `Some(succeeded)` when the completion applied to this session.
    pub(crate) fn finish(&mut self, ticket: u64, succeeded: bool) -> Option<bool> {
        if self.phase != FormPhase::Submitting || ticket != self.counter {
            return None;
        }
        if succeeded {
            self.close();
        } else {
            self.phase = FormPhase::Editing;
        }
        Some(succeeded)
    }
}

/// Send a project update, reporting progress on `notifier`. Never retried.
pub async fn dispatch_project_update(
    api: &Api,
    notifier: &Notifier,
    submission: &Submission<ProjectUpdate>,
) -> Result<Project, RequestError> {
    notifier
        .track(
            PROJECT_UPDATE_MESSAGES,
            api.update_project(submission.id, &submission.payload),
        )
        .await
}

pub async fn dispatch_task_update(
    api: &Api,
    notifier: &Notifier,
    submission: &Submission<TaskUpdate>,
) -> Result<Task, RequestError> {
    notifier
        .track(
            TASK_UPDATE_MESSAGES,
            api.update_task(submission.id, &submission.payload),
        )
        .await
}
