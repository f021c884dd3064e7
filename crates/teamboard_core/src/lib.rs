//! Core domain logic for Teamboard.
//! This crate owns the team/project invariants; UI layers only call into it.

pub mod db;
pub mod logging;
pub mod model;
pub mod notice;
pub mod query;
pub mod repo;
pub mod route;
pub mod session;
pub mod store;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{
    parse_date, Project, ProjectDraft, ProjectId, ProjectStatus, TeamId, DATE_FORMAT,
};
pub use model::seed::{seed_teams, DEFAULT_TEAM_ID};
pub use model::team::Team;
pub use notice::DismissTimer;
pub use query::listing::{Pager, ProjectListing};
pub use query::pipeline::{
    total_pages, visible_projects, visible_projects_now, DateRange, ProjectPage, ProjectQuery,
    StatusFilter, PAGE_SIZE,
};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, SELECTED_TEAM_KEY,
    TEAMS_KEY,
};
pub use route::Route;
pub use session::{current_user, User};
pub use store::team_store::{check_collection, StoreError, StoreResult, TeamStore};
pub use validation::project_form::{
    validate, validate_with, FieldErrors, MemberRule, ProjectField,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
