use rusqlite::Connection;
use vetstore_core::db::fixtures::{load_seed_fixtures, seed_by_id, SEED_VETERINARIANS};
use vetstore_core::db::{open_db_in_memory, DbError};
use vetstore_core::{
    CrudRepository, RepoError, SqliteVeterinarianRepository, VeterinarianRepository,
};

fn seeded_connection() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    load_seed_fixtures(&mut conn).unwrap();
    conn
}

#[test]
fn get_by_id_existing_returns_seeded_record() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    let seed = seed_by_id(1).unwrap();
    let vet = repo.get_by_id(seed.id).unwrap();

    assert_eq!(vet.name, "Conceição Evaristo");
    assert_eq!(vet.email, "conceicao@gmail.com");
    assert_eq!((vet.name.as_str(), vet.email.as_str()), (seed.name, seed.email));
}

#[test]
fn find_by_id_existing_returns_present_record() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    let vet = repo.find_by_id(1).unwrap();

    let vet = vet.expect("seeded id 1 should be present");
    assert_eq!(vet.name, "Conceição Evaristo");
    assert_eq!(vet.email, "conceicao@gmail.com");
}

#[test]
fn every_seeded_id_matches_fixture_values() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    for id in SEED_VETERINARIANS.iter().map(|seed| seed.id) {
        let seed = seed_by_id(id).unwrap();
        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.name, seed.name);
        assert_eq!(found.email, seed.email);
        assert_eq!(repo.get_by_id(id).unwrap(), found);
    }
    assert!(seed_by_id(10).is_none());
}

#[test]
fn get_by_id_missing_fails_with_not_found() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    let err = repo.get_by_id(10).unwrap_err();

    assert!(matches!(
        err,
        RepoError::NotFound { entity: "veterinarian", ref id } if id == "10"
    ));
}

#[test]
fn find_by_id_missing_returns_none() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_id(10).unwrap().is_none());
    assert!(!repo.exists_by_id(10).unwrap());
}

#[test]
fn find_by_id_is_stable_without_mutation() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    let first = repo.find_by_id(3).unwrap();
    let second = repo.find_by_id(3).unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn delete_existing_removes_row_and_decrements_count() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();
    let before = repo.count().unwrap();

    repo.delete_by_id(2).unwrap();

    assert_eq!(repo.count().unwrap(), before - 1);
    assert!(repo.find_by_id(2).unwrap().is_none());
}

#[test]
fn delete_missing_fails_with_not_found_and_keeps_count() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();
    repo.delete_by_id(2).unwrap();
    assert_eq!(repo.count().unwrap(), 2);

    let err = repo.delete_by_id(10).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "veterinarian not found: 10");
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn deleting_same_id_twice_fails_the_second_time() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    repo.delete_by_id(3).unwrap();
    let err = repo.delete_by_id(3).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn name_search_returns_only_matching_rows() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    let hits = repo.find_by_name_contains("Evaristo").unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);
    assert_eq!(hits[0].email, "conceicao@gmail.com");
}

#[test]
fn name_search_matches_every_row_containing_fragment() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    let hits = repo.find_by_name_contains("C").unwrap();

    let ids: Vec<i64> = hits.iter().map(|vet| vet.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(hits.iter().all(|vet| vet.name_contains("C")));
}

#[test]
fn name_search_is_case_sensitive() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_name_contains("evaristo").unwrap().is_empty());
    assert_eq!(repo.find_by_name_contains("Lispector").unwrap().len(), 1);
}

#[test]
fn name_search_treats_like_wildcards_literally() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_name_contains("%").unwrap().is_empty());
    assert!(repo.find_by_name_contains("C_r").unwrap().is_empty());
}

#[test]
fn name_search_without_matches_returns_empty() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_name_contains("Machado").unwrap().is_empty());
}

#[test]
fn empty_fragment_matches_every_row() {
    let conn = seeded_connection();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    assert_eq!(repo.find_by_name_contains("").unwrap().len(), 3);
}

#[test]
fn reads_on_empty_table_return_empty_results() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();

    assert_eq!(repo.count().unwrap(), 0);
    assert!(repo.find_by_id(1).unwrap().is_none());
    assert!(repo.find_by_name_contains("Evaristo").unwrap().is_empty());
    assert!(repo.find_by_email("conceicao@gmail.com").unwrap().is_none());
}

#[test]
fn loading_fixtures_twice_resets_seed_rows() {
    let mut conn = seeded_connection();
    conn.execute(
        "UPDATE veterinarians SET name = 'Renamed' WHERE id = 1;",
        [],
    )
    .unwrap();

    load_seed_fixtures(&mut conn).unwrap();

    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count().unwrap(), 3);
    assert_eq!(repo.get_by_id(1).unwrap().name, "Conceição Evaristo");
}

#[test]
fn failed_fixture_row_rolls_back_whole_seed_set() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER block_second_seed BEFORE INSERT ON veterinarians
         WHEN NEW.id = 2
         BEGIN
            SELECT RAISE(ABORT, 'seed 2 blocked');
         END;",
    )
    .unwrap();

    let err = load_seed_fixtures(&mut conn).unwrap_err();

    assert!(matches!(err, DbError::FixtureLoad { seed_id: 2, .. }));
    assert_eq!(err.code(), "fixture_load_failed");
    let repo = SqliteVeterinarianRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count().unwrap(), 0);
}
