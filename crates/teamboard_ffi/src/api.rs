//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose team selection, project listing and project CRUD to Dart via FRB.
//! - Flatten core results into plain envelopes with `ok` flags and messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call loads state from the database and persists before returning.

use log::warn;
use teamboard_core::db::open_db;
use teamboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    validate, visible_projects_now, DateRange, FieldErrors, Project, ProjectDraft, ProjectQuery,
    ProjectStatus, SqliteSnapshotRepository, StatusFilter, StoreError, TeamStore,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "teamboard.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Team entry for the side menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamItem {
    pub id: i64,
    pub name: String,
    pub members: Vec<String>,
    pub project_count: u32,
    pub selected: bool,
}

/// Side menu payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamsResponse {
    pub ok: bool,
    pub items: Vec<TeamItem>,
    pub selected_team_id: i64,
    /// Name of the selected team, `None` when the selection matches no team.
    pub selected_team_name: Option<String>,
    pub message: String,
}

/// Project card / edit form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// `Pendiente | En progreso | Terminado`.
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub progress: u8,
    pub members: Vec<String>,
    pub team_id: i64,
}

/// One page of the projects view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectsPageResponse {
    pub ok: bool,
    pub items: Vec<ProjectItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub message: String,
}

/// Create/edit form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub progress: u8,
    pub members: Vec<String>,
    /// Edit only: move the project to this team.
    pub team_id: Option<i64>,
}

/// Inline form error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorItem {
    /// Form field key (`nombre`, `fechaInicio`, `fechaFin`, `miembros`).
    pub field: String,
    pub message: String,
}

/// Result of a project form action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectActionResponse {
    pub ok: bool,
    pub project_id: Option<i64>,
    pub message: String,
    pub field_errors: Vec<FieldErrorItem>,
}

impl ProjectActionResponse {
    fn success(message: impl Into<String>, project_id: i64) -> Self {
        Self {
            ok: true,
            project_id: Some(project_id),
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            project_id: None,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    fn invalid(errors: &FieldErrors) -> Self {
        Self {
            ok: false,
            project_id: None,
            message: errors.to_string(),
            field_errors: errors
                .iter()
                .map(|(field, message)| FieldErrorItem {
                    field: field.key().to_string(),
                    message: message.to_string(),
                })
                .collect(),
        }
    }
}

/// Lists teams and the current selection.
#[flutter_rust_bridge::frb(sync)]
pub fn teams_list() -> TeamsResponse {
    let result = with_store(|store| {
        let selected_team_id = store.selected_team_id();
        let items = store
            .teams()
            .iter()
            .map(|team| TeamItem {
                id: team.id,
                name: team.name.clone(),
                members: team.members.clone(),
                project_count: u32::try_from(team.projects.len()).unwrap_or(u32::MAX),
                selected: team.id == selected_team_id,
            })
            .collect::<Vec<_>>();
        TeamsResponse {
            ok: true,
            message: format!("Found {} team(s).", items.len()),
            items,
            selected_team_id,
            selected_team_name: store.selected_team().map(|team| team.name.clone()),
        }
    });

    result.unwrap_or_else(|err| TeamsResponse {
        ok: false,
        items: Vec::new(),
        selected_team_id: 0,
        selected_team_name: None,
        message: format!("teams_list failed: {err}"),
    })
}

/// Selects a team. Unknown ids are accepted and leave no team selected.
#[flutter_rust_bridge::frb(sync)]
pub fn team_select(team_id: i64) -> TeamsResponse {
    if let Err(err) = with_store(|store| store.select_team(team_id)) {
        return TeamsResponse {
            ok: false,
            items: Vec::new(),
            selected_team_id: 0,
            selected_team_name: None,
            message: format!("team_select failed: {err}"),
        };
    }
    teams_list()
}

/// Returns one page of the selected team's projects.
///
/// `status` and `date_range` take the listing labels
/// (`Todos los estados`, `Pendiente`, ... / `Todas las fechas`, `Este mes`, ...).
#[flutter_rust_bridge::frb(sync)]
pub fn projects_page(
    term: String,
    status_label: String,
    date_label: String,
    page: u32,
) -> ProjectsPageResponse {
    let Some(status) = StatusFilter::from_label(&status_label) else {
        return empty_page(
            page,
            format!("projects_page failed: unknown status `{status_label}`"),
        );
    };
    let Some(date_range) = DateRange::from_label(&date_label) else {
        return empty_page(
            page,
            format!("projects_page failed: unknown date range `{date_label}`"),
        );
    };
    let query = ProjectQuery {
        term,
        status,
        date_range,
        page,
    };

    let result = with_store(|store| match store.selected_team() {
        Some(team) => {
            let visible = visible_projects_now(&team.projects, team.id, &query);
            ProjectsPageResponse {
                ok: true,
                message: if visible.items.is_empty() {
                    "No projects.".to_string()
                } else {
                    format!("Found {} project(s).", visible.total_items)
                },
                items: visible.items.iter().map(to_project_item).collect(),
                page: visible.page,
                total_pages: visible.total_pages,
                total_items: u32::try_from(visible.total_items).unwrap_or(u32::MAX),
            }
        }
        None => empty_page(page, "No team selected."),
    });

    result.unwrap_or_else(|err| empty_page(page, format!("projects_page failed: {err}")))
}

/// Validates form input without touching state.
#[flutter_rust_bridge::frb(sync)]
pub fn project_validate(input: ProjectInput) -> ProjectActionResponse {
    let draft = match to_draft(input) {
        Ok(draft) => draft,
        Err(message) => return ProjectActionResponse::failure(message),
    };
    let errors = validate(&draft);
    if errors.is_empty() {
        ProjectActionResponse {
            ok: true,
            project_id: None,
            message: "Project is valid.".to_string(),
            field_errors: Vec::new(),
        }
    } else {
        ProjectActionResponse::invalid(&errors)
    }
}

/// Creates a project in `team_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn project_create(input: ProjectInput, team_id: i64) -> ProjectActionResponse {
    let draft = match to_draft(input) {
        Ok(draft) => draft,
        Err(message) => return ProjectActionResponse::failure(message),
    };
    run_project_action("project_create", "Project created.", |store| {
        store.create_project(draft, team_id)
    })
}

/// Updates a project of the selected team.
#[flutter_rust_bridge::frb(sync)]
pub fn project_update(project_id: i64, input: ProjectInput) -> ProjectActionResponse {
    let draft = match to_draft(input) {
        Ok(draft) => draft,
        Err(message) => return ProjectActionResponse::failure(message),
    };
    run_project_action("project_update", "Project updated.", |store| {
        store.update_project(project_id, draft)
    })
}

/// Deletes a project from `team_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn project_delete(project_id: i64, team_id: i64) -> ProjectActionResponse {
    run_project_action("project_delete", "Project deleted.", |store| {
        store.delete_project(project_id, team_id)
    })
}

type FfiStore<'conn> = TeamStore<SqliteSnapshotRepository<'conn>>;

fn run_project_action(
    operation: &str,
    success_message: &str,
    f: impl FnOnce(&mut FfiStore<'_>) -> Result<Project, StoreError>,
) -> ProjectActionResponse {
    match with_store(f) {
        Ok(Ok(project)) => ProjectActionResponse::success(success_message, project.id),
        Ok(Err(StoreError::Validation(errors))) => ProjectActionResponse::invalid(&errors),
        Ok(Err(err)) => ProjectActionResponse::failure(format!("{operation} failed: {err}")),
        Err(err) => ProjectActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH.get_or_init(default_db_path).clone()
}

#[cfg(not(test))]
fn default_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var("TEAMBOARD_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

// Unit tests never touch the shared default file or the env override.
#[cfg(test)]
fn default_db_path() -> PathBuf {
    tests::scratch_dir().join(DB_FILE_NAME)
}

fn with_store<T>(f: impl FnOnce(&mut FfiStore<'_>) -> T) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("DB open failed: {err}")
    })?;
    let mut store = TeamStore::open(SqliteSnapshotRepository::new(&conn));
    Ok(f(&mut store))
}

fn to_draft(input: ProjectInput) -> Result<ProjectDraft, String> {
    let status = ProjectStatus::from_label(&input.status)
        .ok_or_else(|| format!("unknown project status `{}`", input.status))?;
    Ok(ProjectDraft {
        name: input.name,
        description: input.description,
        status,
        start_date: input.start_date,
        end_date: input.end_date,
        progress: input.progress,
        members: input.members,
        team: input.team_id,
    })
}

fn to_project_item(project: &Project) -> ProjectItem {
    ProjectItem {
        id: project.id,
        name: project.name.clone(),
        description: project.description.clone(),
        status: project.status.label().to_string(),
        start_date: project.start_date.clone(),
        end_date: project.end_date.clone(),
        progress: project.progress,
        members: project.members.clone(),
        team_id: project.team,
    }
}

fn empty_page(page: u32, message: impl Into<String>) -> ProjectsPageResponse {
    ProjectsPageResponse {
        ok: false,
        items: Vec::new(),
        page,
        total_pages: 0,
        total_items: 0,
        message: message.into(),
    }
}
