//! Navigation surface of the projects UI.
//!
//! Three logical routes exist; every other path redirects to the list.

use crate::model::project::ProjectId;
use once_cell::sync::Lazy;
use regex::Regex;

static EDIT_ROUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/proyectos/editar/(\d+)$").expect("valid edit route regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Projects of the selected team.
    ProjectList,
    ProjectCreate,
    ProjectEdit(ProjectId),
}

impl Route {
    /// Matches a path exactly; `None` for paths that should redirect.
    ///
    /// Query strings, fragments and one trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        match path {
            "/proyectos" => Some(Self::ProjectList),
            "/proyectos/crear" => Some(Self::ProjectCreate),
            _ => EDIT_ROUTE_RE
                .captures(path)
                .and_then(|caps| caps.get(1))
                .and_then(|id| id.as_str().parse::<ProjectId>().ok())
                .map(Self::ProjectEdit),
        }
    }

    /// Resolves any path, redirecting unknown ones to the project list.
    pub fn resolve(path: &str) -> Self {
        Self::parse(path).unwrap_or(Self::ProjectList)
    }

    pub fn path(&self) -> String {
        match self {
            Self::ProjectList => "/proyectos".to_string(),
            Self::ProjectCreate => "/proyectos/crear".to_string(),
            Self::ProjectEdit(id) => format!("/proyectos/editar/{id}"),
        }
    }
}
