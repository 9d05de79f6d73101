use skibidict_core::{
    generate_token, AuthService, RepoError, SqliteUserRepository, Store, UserRepository,
    UserValidationError,
};

fn user_count(store: &Store) -> i64 {
    store
        .read(|conn| {
            conn.query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        })
        .unwrap()
}

#[test]
fn valid_token_resolves_to_its_user() {
    let store = Store::open_in_memory().unwrap();
    let auth = AuthService::new(store);

    let created = auth.create_user("alice", "secret-a").unwrap();
    auth.create_user("bob", "secret-b").unwrap();

    let resolved = auth.resolve_user("secret-a").unwrap().unwrap();
    assert_eq!(resolved, created);
    assert_eq!(resolved.name, "alice");
}

#[test]
fn empty_and_unknown_tokens_do_not_resolve() {
    let store = Store::open_in_memory().unwrap();
    let auth = AuthService::new(store);
    auth.create_user("alice", "secret-a").unwrap();

    assert_eq!(auth.resolve_user("").unwrap(), None);
    assert_eq!(auth.resolve_user("secret").unwrap(), None);
    assert_eq!(auth.resolve_user("SECRET-A").unwrap(), None);
}

#[test]
fn duplicate_name_is_rejected_without_partial_row() {
    let store = Store::open_in_memory().unwrap();
    let auth = AuthService::new(store.clone());
    auth.create_user("alice", "secret-a").unwrap();

    let err = auth.create_user("alice", "secret-other").unwrap_err();
    assert!(err.is_uniqueness_violation());
    assert_eq!(user_count(&store), 1);
    assert_eq!(auth.resolve_user("secret-other").unwrap(), None);
}

#[test]
fn duplicate_token_is_rejected() {
    let store = Store::open_in_memory().unwrap();
    let auth = AuthService::new(store.clone());
    auth.create_user("alice", "shared").unwrap();

    let err = auth.create_user("bob", "shared").unwrap_err();
    assert!(matches!(
        err,
        RepoError::UniquenessViolation { table: "users", .. }
    ));
    assert_eq!(user_count(&store), 1);
}

#[test]
fn invalid_user_input_is_rejected() {
    let store = Store::open_in_memory().unwrap();
    let auth = AuthService::new(store);

    assert!(matches!(
        auth.create_user("", "tok").unwrap_err(),
        RepoError::UserValidation(UserValidationError::EmptyName)
    ));
    assert!(matches!(
        auth.create_user("  alice ", "tok").unwrap_err(),
        RepoError::UserValidation(UserValidationError::PaddedName(_))
    ));
    assert!(matches!(
        auth.create_user("alice", "").unwrap_err(),
        RepoError::UserValidation(UserValidationError::EmptyToken)
    ));
}

#[test]
fn names_are_stored_as_given() {
    let store = Store::open_in_memory().unwrap();
    let auth = AuthService::new(store.clone());

    for (name, token) in [("Jane Doe", "tok-1"), ("josé", "tok-2"), ("_svc", "tok-3")] {
        let created = auth.create_user(name, token).unwrap();
        assert_eq!(created.name, name);
        assert_eq!(auth.resolve_user(token).unwrap().unwrap().name, name);
    }
    assert_eq!(user_count(&store), 3);
}

#[test]
fn bootstrap_user_generates_a_resolvable_hex_token() {
    let store = Store::open_in_memory().unwrap();
    let auth = AuthService::new(store);

    let user = auth.bootstrap_user("carol").unwrap();

    assert_eq!(user.token.len(), 64);
    assert!(user.token.chars().all(|ch| ch.is_ascii_hexdigit()));
    assert_eq!(auth.resolve_user(&user.token).unwrap(), Some(user));
}

#[test]
fn generated_tokens_do_not_repeat() {
    let tokens: std::collections::HashSet<_> = (0..64).map(|_| generate_token()).collect();
    assert_eq!(tokens.len(), 64);
}

#[test]
fn user_repository_finds_by_name() {
    let store = Store::open_in_memory().unwrap();
    store
        .write(|conn| -> Result<(), RepoError> {
            let repo = SqliteUserRepository::try_new(conn)?;
            repo.create_user("dave", "tok-d")?;
            let found = repo.find_user_by_name("dave")?.unwrap();
            assert_eq!(found.token, "tok-d");
            assert_eq!(repo.find_user_by_name("nobody")?, None);
            Ok(())
        })
        .unwrap();
}

#[test]
fn serialized_user_omits_token() {
    let store = Store::open_in_memory().unwrap();
    let user = AuthService::new(store).create_user("erin", "tok-e").unwrap();

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["name"], "erin");
    assert!(json.get("token").is_none());
}
