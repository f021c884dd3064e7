//! Team/project state store.
//!
//! # Responsibility
//! - Load state once from a [`SnapshotRepository`] and fall back to the seed.
//! - Expose selection and project create/update/delete operations.
//!
//! # Invariants
//! - Every project in a team's list has `team == team.id`.
//! - Project ids are unique across all teams.
//! - Persistence is best effort: a failed save is logged, state still changes.

use crate::model::project::{Project, ProjectDraft, ProjectId, TeamId};
use crate::model::seed::{seed_teams, DEFAULT_TEAM_ID};
use crate::model::team::Team;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::validation::project_form::{validate, FieldErrors};
use chrono::Utc;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Draft rejected by form rules; state untouched.
    Validation(FieldErrors),
    TeamNotFound(TeamId),
    ProjectNotFound(ProjectId),
    /// Bulk replacement would break a collection invariant.
    InvalidCollection(String),
    /// Every positive project id is taken.
    ProjectIdsExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "{errors}"),
            Self::TeamNotFound(id) => write!(f, "team not found: {id}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::InvalidCollection(message) => write!(f, "invalid team collection: {message}"),
            Self::ProjectIdsExhausted => write!(f, "no unused project id left"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for StoreError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// In-memory team collection plus selection, persisted through `R`.
pub struct TeamStore<R: SnapshotRepository> {
    repo: R,
    teams: Vec<Team>,
    selected_id: TeamId,
}

impl<R: SnapshotRepository> TeamStore<R> {
    /// Builds the store from persisted state.
    ///
    /// Missing, unparseable or inconsistent snapshots fall back to the seed;
    /// a missing or zero selection falls back to [`DEFAULT_TEAM_ID`].
    pub fn open(repo: R) -> Self {
        let selected_id = repo
            .load_selected_team_id()
            .unwrap_or(DEFAULT_TEAM_ID);
        let (teams, source) = match repo.load_teams() {
            Some(teams) => match check_collection(&teams) {
                Ok(()) => (teams, "snapshot"),
                Err(message) => {
                    warn!(
                        "event=store_open module=store status=fallback error_code=invalid_snapshot error={message}"
                    );
                    (seed_teams(), "seed")
                }
            },
            None => (seed_teams(), "seed"),
        };

        info!(
            "event=store_open module=store status=ok source={source} teams={} selected_team_id={selected_id}",
            teams.len()
        );

        Self {
            repo,
            teams,
            selected_id,
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn selected_team_id(&self) -> TeamId {
        self.selected_id
    }

    /// The team whose id equals the selected id, if any.
    pub fn selected_team(&self) -> Option<&Team> {
        self.team(self.selected_id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    /// Looks a project up inside the selected team, as the edit form does.
    pub fn selected_project(&self, project_id: ProjectId) -> Option<&Project> {
        self.selected_team()?.project(project_id)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Changes the selection and persists it.
    ///
    /// Unknown ids are accepted; `selected_team()` then returns `None`.
    pub fn select_team(&mut self, id: TeamId) {
        self.selected_id = id;
        if let Err(err) = self.repo.save_selected_team_id(id) {
            warn!("event=team_select module=store status=error error_code=persist_failed error={err}");
        }
        info!(
            "event=team_select module=store status=ok team_id={id} found={}",
            self.selected_team().is_some()
        );
    }

    /// Validates `draft`, assigns a fresh id and appends it to `team_id`.
    pub fn create_project(&mut self, draft: ProjectDraft, team_id: TeamId) -> StoreResult<Project> {
        check_draft(&draft)?;
        let team_index = self
            .team_index(team_id)
            .ok_or(StoreError::TeamNotFound(team_id))?;

        let project_id = self
            .next_project_id()
            .ok_or(StoreError::ProjectIdsExhausted)?;
        let project = draft.into_project(project_id, team_id);
        self.teams[team_index].projects.push(project.clone());
        self.persist_teams("project_create");

        info!(
            "event=project_create module=store status=ok project_id={} team_id={team_id}",
            project.id
        );
        Ok(project)
    }

    /// Replaces every field but the id of a project in the selected team.
    ///
    /// When `draft.team` names another team the project moves to the end of
    /// that team's list.
    pub fn update_project(
        &mut self,
        project_id: ProjectId,
        draft: ProjectDraft,
    ) -> StoreResult<Project> {
        check_draft(&draft)?;
        let source_index = self
            .team_index(self.selected_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;
        let position = self.teams[source_index]
            .position_of(project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;

        let source_team = self.teams[source_index].id;
        let target_team = draft.team.unwrap_or(source_team);
        let target_index = if target_team == source_team {
            source_index
        } else {
            self.team_index(target_team)
                .ok_or(StoreError::TeamNotFound(target_team))?
        };

        let project = draft.into_project(project_id, target_team);
        if target_index == source_index {
            self.teams[source_index].projects[position] = project.clone();
        } else {
            self.teams[source_index].projects.remove(position);
            self.teams[target_index].projects.push(project.clone());
        }
        self.persist_teams("project_update");

        info!(
            "event=project_update module=store status=ok project_id={project_id} team_id={target_team} moved={}",
            target_team != source_team
        );
        Ok(project)
    }

    /// Removes a project from `team_id` and returns it.
    pub fn delete_project(&mut self, project_id: ProjectId, team_id: TeamId) -> StoreResult<Project> {
        let team_index = self
            .team_index(team_id)
            .ok_or(StoreError::TeamNotFound(team_id))?;
        let position = self.teams[team_index]
            .position_of(project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;

        let removed = self.teams[team_index].projects.remove(position);
        self.persist_teams("project_delete");

        info!("event=project_delete module=store status=ok project_id={project_id} team_id={team_id}");
        Ok(removed)
    }

    /// Replaces the whole collection after checking its invariants.
    pub fn replace_teams(&mut self, teams: Vec<Team>) -> StoreResult<()> {
        check_collection(&teams).map_err(StoreError::InvalidCollection)?;
        self.teams = teams;
        self.persist_teams("teams_replace");
        info!(
            "event=teams_replace module=store status=ok teams={}",
            self.teams.len()
        );
        Ok(())
    }

    fn team_index(&self, id: TeamId) -> Option<usize> {
        self.teams.iter().position(|team| team.id == id)
    }

    /// Current epoch milliseconds, raised past every existing id. Once the
    /// highest id is `i64::MAX` the first unused positive id at or after now
    /// is taken instead, wrapping around to 1.
    fn next_project_id(&self) -> Option<ProjectId> {
        let now = Utc::now().timestamp_millis().max(1);
        let ids = self
            .teams
            .iter()
            .flat_map(|team| team.projects.iter())
            .map(|project| project.id)
            .collect::<HashSet<_>>();
        match ids.iter().max().copied().unwrap_or(0).checked_add(1) {
            Some(next) => Some(now.max(next)),
            None => (now..=ProjectId::MAX)
                .chain(1..now)
                .find(|id| !ids.contains(id)),
        }
    }

    fn persist_teams(&self, event: &str) {
        if let Err(err) = self.repo.save_teams(&self.teams) {
            warn!("event={event} module=store status=error error_code=persist_failed error={err}");
        }
    }
}

fn check_draft(draft: &ProjectDraft) -> Result<(), FieldErrors> {
    let errors = validate(draft);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks id uniqueness and project ownership across a team collection.
pub fn check_collection(teams: &[Team]) -> Result<(), String> {
    let mut team_ids = HashSet::new();
    let mut project_ids = HashSet::new();

    for team in teams {
        if !team_ids.insert(team.id) {
            return Err(format!("duplicate team id {}", team.id));
        }
        if team.name.trim().is_empty() {
            return Err(format!("team {} has an empty name", team.id));
        }
        for project in &team.projects {
            if project.team != team.id {
                return Err(format!(
                    "project {} belongs to team {} but is listed under team {}",
                    project.id, project.team, team.id
                ));
            }
            if !project_ids.insert(project.id) {
                return Err(format!("duplicate project id {}", project.id));
            }
        }
    }

    Ok(())
}
