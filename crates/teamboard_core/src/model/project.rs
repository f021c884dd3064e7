//! Project domain model.
//!
//! # Responsibility
//! - Define the tracked project record and its editable draft form.
//! - Own the calendar date text format used by forms and filters.
//!
//! # Invariants
//! - `id` is assigned by the store and never changed by an update.
//! - Dates are stored as `YYYY-MM-DD` text; parsing happens at use sites.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique project identifier, allocated from wall-clock milliseconds.
pub type ProjectId = i64;

/// Unique team identifier.
pub type TeamId = i64;

/// Text format of `start_date` / `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle state of a project.
///
/// Serialized with the labels the client has always stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Terminado")]
    Done,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Display/storage label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProgress => "En progreso",
            Self::Done => "Terminado",
        }
    }

    /// Parses a storage label or its snake_case alias.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "Pendiente" | "pending" => Some(Self::Pending),
            "En progreso" | "in_progress" => Some(Self::InProgress),
            "Terminado" | "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// A unit of tracked work owned by exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "estado")]
    pub status: ProjectStatus,
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    /// Percentage, 0..=100. Not cross-checked against `status`.
    #[serde(rename = "progreso", default)]
    pub progress: u8,
    /// Display names; order kept, duplicates allowed.
    #[serde(rename = "miembros", default)]
    pub members: Vec<String>,
    /// Owning team. Must equal the id of the team whose list holds this project.
    #[serde(rename = "equipo")]
    pub team: TeamId,
}

impl Project {
    /// Parsed `start_date`, or `None` when the stored text is not a date.
    pub fn start(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date)
    }

    /// Parsed `end_date`, or `None` when the stored text is not a date.
    pub fn end(&self) -> Option<NaiveDate> {
        parse_date(&self.end_date)
    }

    /// Builds an edit-form draft prefilled from this project.
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            progress: self.progress,
            members: self.members.clone(),
            team: Some(self.team),
        }
    }
}

/// Uncommitted project field values coming from a create/edit form.
///
/// `team` is only read by updates: `None` keeps the project where it is,
/// `Some(id)` asks for relocation to another team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: String,
    pub end_date: String,
    pub progress: u8,
    pub members: Vec<String>,
    pub team: Option<TeamId>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: ProjectStatus::InProgress,
            start_date: String::new(),
            end_date: String::new(),
            progress: 0,
            members: Vec::new(),
            team: None,
        }
    }
}

impl ProjectDraft {
    /// Commits this draft into a project record with the given identity.
    ///
    /// Text fields are kept as typed except `name`, which is trimmed, and
    /// `progress`, which is capped at 100.
    pub fn into_project(self, id: ProjectId, team: TeamId) -> Project {
        Project {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            status: self.status,
            start_date: self.start_date.trim().to_string(),
            end_date: self.end_date.trim().to_string(),
            progress: self.progress.min(100),
            members: self.members,
            team,
        }
    }
}

/// Parses `YYYY-MM-DD` text into a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_date, Project, ProjectDraft, ProjectStatus};

    #[test]
    fn status_labels_roundtrip() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(ProjectStatus::from_label("Todos los estados"), None);
    }

    #[test]
    fn project_serializes_with_client_field_names() {
        let project = ProjectDraft {
            name: " Cloud Migration ".to_string(),
            status: ProjectStatus::Pending,
            start_date: "2024-01-10".to_string(),
            end_date: "2024-03-01".to_string(),
            progress: 10,
            members: vec!["Ana".to_string()],
            ..ProjectDraft::default()
        }
        .into_project(7, 3);

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["nombre"], "Cloud Migration");
        assert_eq!(json["estado"], "Pendiente");
        assert_eq!(json["fechaInicio"], "2024-01-10");
        assert_eq!(json["equipo"], 3);

        let back: Project = serde_json::from_value(json).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn into_project_caps_progress() {
        let draft = ProjectDraft {
            progress: 250,
            ..ProjectDraft::default()
        };
        assert_eq!(draft.into_project(1, 1).progress, 100);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2024-02-29").is_some());
        assert!(parse_date("29/02/2024").is_none());
        assert!(parse_date("").is_none());
    }
}
