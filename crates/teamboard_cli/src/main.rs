//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `teamboard_core` linkage and storage bootstrap from a terminal.
//! - Print the team collection and the selected team's first page.
//!
//! Usage: `teamboard_cli [DB_PATH]`. Without a path an in-memory database
//! is used, so the built-in seed is shown.

use std::process::ExitCode;
use teamboard_core::db::{open_db, open_db_in_memory};
use teamboard_core::{visible_projects_now, ProjectQuery, SqliteSnapshotRepository, TeamStore};

fn main() -> ExitCode {
    println!("teamboard_core ping={}", teamboard_core::ping());
    println!("teamboard_core version={}", teamboard_core::core_version());

    let opened = match std::env::args().nth(1) {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let store = TeamStore::open(SqliteSnapshotRepository::new(&conn));
    for team in store.teams() {
        let marker = if team.id == store.selected_team_id() {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} team id={} name={} projects={}",
            team.id,
            team.name,
            team.projects.len()
        );
    }

    match store.selected_team() {
        Some(team) => {
            let page = visible_projects_now(&team.projects, team.id, &ProjectQuery::default());
            for project in &page.items {
                println!(
                    "  project id={} status={} progress={} name={}",
                    project.id,
                    project.status.label(),
                    project.progress,
                    project.name
                );
            }
            println!("  page={}/{}", page.page, page.total_pages);
        }
        None => println!("no team selected (id={})", store.selected_team_id()),
    }

    ExitCode::SUCCESS
}
