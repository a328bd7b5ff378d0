use crate::client::api::Api;
use crate::client::error::RequestError;
use crate::client::forms::dates::{parse_edit_date, seed_edit_date};
use crate::client::forms::{
    dispatch_project_update, FormPhase, Session, Submission, ValidationError,
};
use crate::client::notify::Notifier;
use crate::models::{Project, ProjectUpdate, Team};

/// Raw input values of the edit-project modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    /// Selected team id as shown by the selector; empty means none selected.
    pub team_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl ProjectFields {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
            team_id: project.team_id.map(|id| id.to_string()).unwrap_or_default(),
            start_date: seed_edit_date(project.start_date.as_ref()),
            end_date: seed_edit_date(project.end_date.as_ref()),
        }
    }

    pub fn validate(&self) -> Result<ProjectUpdate, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let team_id = self.team_id.trim();
        if team_id.is_empty() {
            return Err(ValidationError::NoTeamSelected);
        }
        let team_id: i32 = team_id
            .parse()
            .map_err(|_| ValidationError::InvalidTeam(team_id.to_string()))?;

        let start_date = required_date(&self.start_date, "start date")?;
        let end_date = required_date(&self.end_date, "end date")?;

        let description = self.description.trim();
        Ok(ProjectUpdate {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            start_date: Some(start_date),
            end_date: Some(end_date),
            team_id: Some(team_id),
        })
    }
}

fn required_date(
    input: &str,
    field: &'static str,
) -> Result<chrono::DateTime<chrono::Utc>, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::MissingDate(field));
    }
    parse_edit_date(input).ok_or(ValidationError::InvalidDate(field))
}

/// Choices for the team selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TeamOptions {
    #[default]
    Loading,
    Ready(Vec<Team>),
    Failed,
}

impl TeamOptions {
    pub fn from_result(result: Result<Vec<Team>, RequestError>) -> Self {
        match result {
            Ok(teams) => TeamOptions::Ready(teams),
            Err(e) => {
                tracing::warn!("failed to load teams: {e}");
                TeamOptions::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TeamOptions::Loading)
    }

    pub fn teams(&self) -> &[Team] {
        match self {
            TeamOptions::Ready(teams) => teams,
            _ => &[],
        }
    }
}

/// State of the edit-project modal.
#[derive(Debug, Default)]
pub struct EditProjectForm {
    session: Session,
    fields: ProjectFields,
    teams: TeamOptions,
}

impl EditProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.session.phase()
    }

    pub fn is_open(&self) -> bool {
        self.phase() != FormPhase::Closed
    }

    pub fn project_id(&self) -> Option<i32> {
        self.session.entity_id()
    }

    pub fn fields(&self) -> &ProjectFields {
        &self.fields
    }

    /// Apply an input change. Ignored unless the form is `Editing`.
    pub fn edit(&mut self, change: impl FnOnce(&mut ProjectFields)) {
        if self.phase() == FormPhase::Editing {
            change(&mut self.fields);
        }
    }

    pub fn teams(&self) -> &TeamOptions {
        &self.teams
    }

    pub fn set_teams(&mut self, teams: TeamOptions) {
        self.teams = teams;
    }

    pub async fn load_teams(&mut self, api: &Api) {
        self.teams = TeamOptions::from_result(api.get_teams().await);
    }

    pub fn team_selector_disabled(&self) -> bool {
        self.teams.is_loading()
    }

    pub fn submit_disabled(&self) -> bool {
        self.phase() != FormPhase::Editing
    }

    pub fn submit_label(&self) -> &'static str {
        if self.phase() == FormPhase::Submitting {
            "Saving..."
        } else {
            "Save Changes"
        }
    }

    /// Start waiting for `project_id`; fields stay blank until [`load`](Self::load).
    pub fn open(&mut self, project_id: i32) {
        self.session.open(project_id);
        self.fields = ProjectFields::default();
    }

    /// Seed the fields from the project being waited on.
    pub fn load(&mut self, project: &Project) {
        if self.session.loaded(project.id) {
            self.fields = ProjectFields::from_project(project);
        }
    }

    pub fn open_with(&mut self, project: &Project) {
        self.open(project.id);
        self.load(project);
    }

    pub fn close(&mut self) {
        self.session.close();
        self.fields = ProjectFields::default();
    }

    pub fn validate(&self) -> Result<ProjectUpdate, ValidationError> {
        self.fields.validate()
    }

    /// Accept the current fields for sending. `None` (and no state change)
    /// when the form is not `Editing` or the fields are invalid.
    pub fn submit(&mut self) -> Option<Submission<ProjectUpdate>> {
        if self.phase() != FormPhase::Editing {
            return None;
        }
        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!("project form not submitted: {e}");
                return None;
            }
        };
        self.session.begin_submit(payload)
    }

    /// Settle a submission. Returns whether it applied to this form.
    pub fn complete(
        &mut self,
        submission: &Submission<ProjectUpdate>,
        result: &Result<Project, RequestError>,
    ) -> bool {
        match self.session.finish(submission.ticket(), result.is_ok()) {
            Some(true) => {
                self.fields = ProjectFields::default();
                true
            }
            Some(false) => true,
            None => false,
        }
    }

    /// Submit, send and settle in one step. `None` when nothing was sent.
    pub async fn submit_via(
        &mut self,
        api: &Api,
        notifier: &Notifier,
    ) -> Option<Result<Project, RequestError>> {
        let submission = self.submit()?;
        let result = dispatch_project_update(api, notifier, &submission).await;
        self.complete(&submission, &result);
        Some(result)
    }
}
