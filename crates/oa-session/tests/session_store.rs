//! Integration tests for `SessionStore` over real backing stores.
//!
//! A "restart" is modelled two ways: handing the same `MemoryStore` to a
//! new session, and reopening the same `FileStore` path. Either way the
//! new session starts with an empty cache and has to rehydrate.

use oa_model::{Department, User};
use oa_session::{Combine, Permissions, SessionConfig, SessionStore};
use oa_storage::{FileStore, KeyValueStore, MemoryStore};

// =========================================================================
// Helpers
// =========================================================================

fn user(uid: i64, department: &str, leader: i64) -> User {
    User::new(uid).with_department(Department::new(department).with_leader(leader))
}

fn signed_in(u: User) -> SessionStore<MemoryStore> {
    let mut session = SessionStore::new(MemoryStore::new());
    session.set_session(u, "token-abc").expect("set_session");
    session
}

// =========================================================================
// Persistence across restarts
// =========================================================================

#[test]
fn test_round_trip_survives_memory_restart() {
    let u = user(5, "董事会", 9);
    let storage = signed_in(u.clone()).into_storage();

    let mut fresh = SessionStore::new(storage);

    assert_eq!(fresh.user().unwrap(), &u);
    assert_eq!(fresh.token().unwrap(), "token-abc");
    assert!(fresh.is_logged_in().unwrap());
}

#[test]
fn test_round_trip_survives_file_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let u = user(5, "Engineering", 5).with_attribute("realname", "Li Si");

    {
        let mut session = SessionStore::new(FileStore::open(&path).unwrap());
        session.set_session(u.clone(), "file-token").unwrap();
    }

    let mut fresh = SessionStore::new(FileStore::open(&path).unwrap());
    assert_eq!(fresh.user().unwrap(), &u);
    assert_eq!(fresh.token().unwrap(), "file-token");
    assert_eq!(fresh.own_permissions().unwrap(), Permissions::LEADER);
}

#[test]
fn test_clear_survives_file_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let mut session = SessionStore::new(FileStore::open(&path).unwrap());
        session.set_session(user(5, "董事会", 9), "t").unwrap();
        session.clear_session().unwrap();
    }

    let mut fresh = SessionStore::new(FileStore::open(&path).unwrap());
    assert!(!fresh.is_logged_in().unwrap());
    assert!(fresh.user().unwrap().is_empty());
    assert_eq!(fresh.token().unwrap(), "");
}

#[test]
fn test_restart_reads_what_browser_client_wrote() {
    // The exact shape the browser client persists: JSON user, raw token.
    let mut storage = MemoryStore::new();
    storage
        .set(
            "OA_USER_KEY",
            r#"{"uid":"hJ2kD9","realname":"Wang Wu","email":"w@oa.example","department":{"id":1,"name":"董事会","intro":"board","leader":"hJ2kD9"}}"#,
        )
        .unwrap();
    storage.set("OA_TOKEN_KEY", "eyJhbGciOi.fake.jwt").unwrap();

    let mut session = SessionStore::new(storage);

    assert!(session.is_logged_in().unwrap());
    assert_eq!(
        session.own_permissions().unwrap(),
        Permissions::BOARDER | Permissions::LEADER
    );
    assert_eq!(session.user().unwrap().attributes["email"], "w@oa.example");
}

#[test]
fn test_malformed_user_after_restart_reads_signed_out() {
    let mut storage = signed_in(user(5, "董事会", 9)).into_storage();
    storage.set("OA_USER_KEY", "{\"uid\": 5,").unwrap();

    let mut fresh = SessionStore::new(storage);

    assert!(!fresh.is_logged_in().unwrap());
    assert_eq!(fresh.own_permissions().unwrap(), Permissions::STAFF);
    // The raw token is still there; only the user half is unusable.
    assert_eq!(fresh.token().unwrap(), "token-abc");
}

#[test]
fn test_custom_config_restart_uses_same_keys() {
    let config = SessionConfig {
        user_key: "my-app/user".into(),
        token_key: "my-app/token".into(),
        board_department: "Board".into(),
    };
    let mut session = SessionStore::with_config(MemoryStore::new(), config.clone());
    session.set_session(user(1, "Board", 2), "t").unwrap();

    let mut fresh = SessionStore::with_config(session.into_storage(), config);

    assert_eq!(fresh.own_permissions().unwrap(), Permissions::BOARDER);
}

// =========================================================================
// Permission scenarios
// =========================================================================

#[test]
fn test_scenario_board_member() {
    let mut session = signed_in(user(5, "董事会", 9));
    let required = [Permissions::BOARDER, Permissions::LEADER];

    assert_eq!(session.own_permissions().unwrap().bits(), 0b001);
    assert!(session.has_permission(&required, "|".parse().unwrap()).unwrap());
    assert!(!session.has_permission(&required, "&".parse().unwrap()).unwrap());
}

#[test]
fn test_scenario_own_department_leader() {
    let mut session = signed_in(user(5, "Engineering", 5));

    assert_eq!(session.own_permissions().unwrap().bits(), 0b010);
    assert!(session.has_permission(&[Permissions::LEADER], Combine::All).unwrap());
}

#[test]
fn test_scenario_signed_out() {
    let mut session = SessionStore::new(MemoryStore::new());

    assert_eq!(session.own_permissions().unwrap().bits(), 0);
    assert!(session.has_permission(&[Permissions::STAFF], Combine::Any).unwrap());
    assert!(!session.has_permission(&[Permissions::BOARDER], Combine::Any).unwrap());
}

#[test]
fn test_scenario_empty_requirement_list() {
    for u in [user(5, "董事会", 9), user(5, "Sales", 9)] {
        let mut session = signed_in(u);
        assert!(!session.has_permission(&[], Combine::Any).unwrap());
        assert!(session.has_permission(&[], Combine::All).unwrap());
    }
    let mut signed_out = SessionStore::new(MemoryStore::new());
    assert!(!signed_out.has_permission(&[], Combine::Any).unwrap());
    assert!(signed_out.has_permission(&[], Combine::All).unwrap());
}

#[test]
fn test_scenario_all_sentinel_never_satisfied_by_derivation() {
    // Even a board member who leads the board lacks the reserved bit.
    let mut session = signed_in(user(5, "董事会", 5));

    assert!(!session.has_permission(&[Permissions::ALL], Combine::Any).unwrap());
    assert!(
        session
            .has_permission(&[Permissions::BOARDER | Permissions::LEADER], Combine::All)
            .unwrap()
    );
}

#[test]
fn test_scenario_logout_revokes_permissions() {
    let mut session = signed_in(user(5, "董事会", 5));
    assert!(session.has_permission(&[Permissions::BOARDER], Combine::Any).unwrap());

    session.clear_session().unwrap();

    assert!(!session.has_permission(&[Permissions::BOARDER], Combine::Any).unwrap());
    assert_eq!(session.own_permissions().unwrap(), Permissions::STAFF);
}
