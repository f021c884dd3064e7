//! Team domain model.

use crate::model::project::{Project, ProjectId, TeamId};
use serde::{Deserialize, Serialize};

/// A named group owning a list of projects and a member pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "proyectos", default)]
    pub projects: Vec<Project>,
    /// Pool from which project members are picked.
    #[serde(rename = "miembros", default)]
    pub members: Vec<String>,
}

impl Team {
    /// Creates a team with no projects and no members.
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            projects: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Looks a project up by id inside this team only.
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub(crate) fn position_of(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }
}
