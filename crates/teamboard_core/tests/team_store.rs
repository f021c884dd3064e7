use rusqlite::Connection;
use teamboard_core::db::open_db_in_memory;
use teamboard_core::{
    seed_teams, ProjectDraft, ProjectField, ProjectStatus, SnapshotRepository,
    SqliteSnapshotRepository, StoreError, Team, TeamStore, DEFAULT_TEAM_ID, SELECTED_TEAM_KEY,
    TEAMS_KEY,
};

fn draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        description: "draft".to_string(),
        status: ProjectStatus::Pending,
        start_date: "2025-01-01".to_string(),
        end_date: "2025-02-01".to_string(),
        progress: 5,
        members: vec!["Ana".to_string()],
        team: None,
    }
}

fn open_store(conn: &Connection) -> TeamStore<SqliteSnapshotRepository<'_>> {
    TeamStore::open(SqliteSnapshotRepository::new(conn))
}

#[test]
fn fresh_store_uses_seed_and_default_selection() {
    let conn = open_db_in_memory().unwrap();
    let store = open_store(&conn);

    assert_eq!(store.teams(), seed_teams().as_slice());
    assert_eq!(store.selected_team_id(), DEFAULT_TEAM_ID);
    assert_eq!(store.selected_team().map(|team| team.id), Some(DEFAULT_TEAM_ID));
}

#[test]
fn store_restores_persisted_teams_and_selection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);
    let mut team = Team::new(7, "Persistido");
    team.members.push("Eva".to_string());
    repo.save_teams(&[team.clone()]).unwrap();
    repo.save_selected_team_id(7).unwrap();

    let store = TeamStore::open(repo);
    assert_eq!(store.teams(), &[team]);
    assert_eq!(store.selected_team().map(|team| team.name.as_str()), Some("Persistido"));
}

#[test]
fn malformed_snapshot_falls_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);
    repo.put_entry(TEAMS_KEY, "not json").unwrap();
    repo.put_entry(SELECTED_TEAM_KEY, "0").unwrap();

    let store = TeamStore::open(repo);
    assert_eq!(store.teams(), seed_teams().as_slice());
    assert_eq!(store.selected_team_id(), DEFAULT_TEAM_ID);
}

#[test]
fn inconsistent_snapshot_falls_back_to_seed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);
    let mut teams = seed_teams();
    teams[0].projects[0].team = 2;
    repo.save_teams(&teams).unwrap();

    let store = TeamStore::open(repo);
    assert_eq!(store.teams(), seed_teams().as_slice());
}

#[test]
fn create_project_appends_one_project_with_unique_id() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let before = store.selected_team().unwrap().projects.len();

    let created = store.create_project(draft("Nuevo"), DEFAULT_TEAM_ID).unwrap();
    let second = store.create_project(draft("Otro"), DEFAULT_TEAM_ID).unwrap();

    let team = store.selected_team().unwrap();
    assert_eq!(team.projects.len(), before + 2);
    assert_eq!(team.projects[before], created);
    assert_eq!(created.team, DEFAULT_TEAM_ID);
    assert_ne!(created.id, second.id);

    let all_ids = store
        .teams()
        .iter()
        .flat_map(|team| team.projects.iter().map(|project| project.id))
        .collect::<Vec<_>>();
    let unique = all_ids.iter().collect::<std::collections::HashSet<_>>();
    assert_eq!(unique.len(), all_ids.len());
}

#[test]
fn create_project_after_max_id_picks_unused_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);
    let mut team = Team::new(7, "Tope");
    team.projects.push(draft("Ultimo").into_project(i64::MAX, 7));
    repo.save_teams(&[team]).unwrap();
    repo.save_selected_team_id(7).unwrap();

    let mut store = TeamStore::open(repo);
    assert_eq!(store.teams()[0].projects[0].id, i64::MAX);

    let first = store.create_project(draft("Nuevo"), 7).unwrap();
    let second = store.create_project(draft("Otro"), 7).unwrap();

    assert!(first.id > 0);
    assert!(second.id > 0);
    assert_ne!(first.id, i64::MAX);
    assert_ne!(second.id, i64::MAX);
    assert_ne!(first.id, second.id);
    assert_eq!(store.selected_team().unwrap().projects.len(), 3);
}

#[test]
fn create_project_ignores_draft_team_and_uses_target() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let mut request = draft("Asignado");
    request.team = Some(1);
    let created = store.create_project(request, 3).unwrap();

    assert_eq!(created.team, 3);
    assert!(store.team(3).unwrap().project(created.id).is_some());
    assert!(store.team(1).unwrap().project(created.id).is_none());
}

#[test]
fn create_project_is_persisted() {
    let conn = open_db_in_memory().unwrap();
    let created = {
        let mut store = open_store(&conn);
        store.create_project(draft("Persistente"), 2).unwrap()
    };

    let reopened = open_store(&conn);
    assert_eq!(reopened.team(2).unwrap().project(created.id), Some(&created));
}

#[test]
fn create_project_in_unknown_team_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let err = store.create_project(draft("Huérfano"), 99).unwrap_err();
    assert_eq!(err, StoreError::TeamNotFound(99));
    assert_eq!(store.teams(), seed_teams().as_slice());
}

#[test]
fn invalid_draft_is_rejected_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let mut request = draft("   ");
    request.members.clear();
    match store.create_project(request, DEFAULT_TEAM_ID).unwrap_err() {
        StoreError::Validation(errors) => {
            assert!(errors.contains(ProjectField::Name));
            assert!(errors.contains(ProjectField::Members));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.teams(), seed_teams().as_slice());
}

#[test]
fn update_project_replaces_fields_but_keeps_id() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let original = store.selected_team().unwrap().projects[0].clone();

    let mut edit = original.to_draft();
    edit.name = "Renombrado".to_string();
    edit.status = ProjectStatus::Done;
    edit.progress = 100;
    let updated = store.update_project(original.id, edit).unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.team, original.team);
    let stored = store.selected_project(original.id).unwrap();
    assert_eq!(stored.name, "Renombrado");
    assert_eq!(stored.status, ProjectStatus::Done);
    assert_eq!(store.selected_team().unwrap().projects[0].id, original.id);
}

#[test]
fn update_project_only_searches_selected_team() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let foreign = store.team(3).unwrap().projects[0].clone();

    let err = store.update_project(foreign.id, foreign.to_draft()).unwrap_err();
    assert_eq!(err, StoreError::ProjectNotFound(foreign.id));

    store.select_team(3);
    assert!(store.update_project(foreign.id, foreign.to_draft()).is_ok());
}

#[test]
fn update_project_relocates_between_teams() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let moving = store.selected_team().unwrap().projects[0].clone();

    let mut edit = moving.to_draft();
    edit.team = Some(2);
    let moved = store.update_project(moving.id, edit).unwrap();

    assert_eq!(moved.team, 2);
    assert!(store.team(1).unwrap().project(moving.id).is_none());
    assert_eq!(store.team(2).unwrap().projects.last(), Some(&moved));
}

#[test]
fn update_project_to_unknown_team_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let project = store.selected_team().unwrap().projects[0].clone();

    let mut edit = project.to_draft();
    edit.team = Some(42);
    assert_eq!(
        store.update_project(project.id, edit).unwrap_err(),
        StoreError::TeamNotFound(42)
    );
    assert_eq!(store.teams(), seed_teams().as_slice());
}

#[test]
fn delete_project_removes_only_from_target_team() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let victim = store.team(1).unwrap().projects[0].clone();
    let others = store
        .teams()
        .iter()
        .filter(|team| team.id != 1)
        .cloned()
        .collect::<Vec<_>>();

    let removed = store.delete_project(victim.id, 1).unwrap();
    assert_eq!(removed, victim);
    assert!(store.team(1).unwrap().project(victim.id).is_none());
    for team in others {
        assert_eq!(store.team(team.id), Some(&team));
    }

    let reopened = open_store(&conn);
    assert!(reopened.team(1).unwrap().project(victim.id).is_none());
}

#[test]
fn delete_project_reports_referential_misses() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let project_id = store.team(3).unwrap().projects[0].id;

    assert_eq!(
        store.delete_project(project_id, 1).unwrap_err(),
        StoreError::ProjectNotFound(project_id)
    );
    assert_eq!(
        store.delete_project(project_id, 77).unwrap_err(),
        StoreError::TeamNotFound(77)
    );
    assert!(store.team(3).unwrap().project(project_id).is_some());
}

#[test]
fn selecting_unknown_team_yields_no_selected_team() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    store.select_team(404);
    assert_eq!(store.selected_team_id(), 404);
    assert!(store.selected_team().is_none());
    assert!(store.selected_project(101).is_none());
}

#[test]
fn selection_is_persisted_across_sessions() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut store = open_store(&conn);
        store.select_team(3);
    }

    let reopened = open_store(&conn);
    assert_eq!(reopened.selected_team_id(), 3);
    assert_eq!(reopened.selected_team().map(|team| team.name.as_str()), Some("Boomerang"));
}

#[test]
fn selected_team_reflects_mutations_immediately() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    store.select_team(3);

    let created = store.create_project(draft("Visible"), 3).unwrap();
    assert!(store.selected_team().unwrap().project(created.id).is_some());

    store.delete_project(created.id, 3).unwrap();
    assert!(store.selected_team().unwrap().project(created.id).is_none());
}

#[test]
fn replace_teams_validates_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let duplicate = vec![Team::new(1, "A"), Team::new(1, "B")];
    assert!(matches!(
        store.replace_teams(duplicate),
        Err(StoreError::InvalidCollection(_))
    ));

    let replacement = vec![Team::new(10, "Diez")];
    store.replace_teams(replacement.clone()).unwrap();
    assert_eq!(store.teams(), replacement.as_slice());
    assert_eq!(store.repository().load_teams(), Some(replacement));
}

#[test]
fn failed_persistence_does_not_block_mutations() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    conn.execute_batch("DROP TABLE kv_entries;").unwrap();

    let created = store.create_project(draft("Sin disco"), 1).unwrap();
    assert!(store.team(1).unwrap().project(created.id).is_some());
    store.select_team(2);
    assert_eq!(store.selected_team_id(), 2);
}
