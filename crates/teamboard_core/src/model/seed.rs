//! Built-in team collection used when no snapshot has been persisted yet.

use crate::model::project::{Project, ProjectStatus, TeamId};
use crate::model::team::Team;

/// Team selected when nothing usable has been persisted.
pub const DEFAULT_TEAM_ID: TeamId = 1;

/// Returns the seed collection shipped with the application.
pub fn seed_teams() -> Vec<Team> {
    vec![
        Team {
            id: 1,
            name: "Atlas".to_string(),
            projects: vec![
                seed_project(
                    101,
                    1,
                    "Portal de clientes",
                    ProjectStatus::InProgress,
                    ("2025-02-03", "2025-07-31"),
                    45,
                    &["Laura Gómez", "Carlos Ruiz"],
                ),
                seed_project(
                    102,
                    1,
                    "Rediseño de facturación",
                    ProjectStatus::Done,
                    ("2024-09-01", "2025-01-15"),
                    100,
                    &["Carlos Ruiz"],
                ),
            ],
            members: names(&["Laura Gómez", "Carlos Ruiz", "Marta Díaz"]),
        },
        Team {
            id: 2,
            name: "Nebula".to_string(),
            projects: vec![seed_project(
                201,
                2,
                "App móvil de reservas",
                ProjectStatus::Pending,
                ("2025-06-01", "2025-12-20"),
                0,
                &["Sofía León"],
            )],
            members: names(&["Sofía León", "Diego Herrera"]),
        },
        Team {
            id: 3,
            name: "Boomerang".to_string(),
            projects: vec![seed_project(
                301,
                3,
                "Cloud Migration",
                ProjectStatus::Pending,
                ("2025-03-10", "2025-10-30"),
                10,
                &["Pablo Méndez", "Lucía Vargas"],
            )],
            members: names(&["Pablo Méndez", "Lucía Vargas", "Andrés Soto"]),
        },
    ]
}

fn seed_project(
    id: i64,
    team: TeamId,
    name: &str,
    status: ProjectStatus,
    (start_date, end_date): (&str, &str),
    progress: u8,
    members: &[&str],
) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: String::new(),
        status,
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        progress,
        members: names(members),
        team,
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
