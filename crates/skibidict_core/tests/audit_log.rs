use skibidict_core::{
    AuditAction, AuditService, AuthService, Definition, Store, User, WordInput, WordService,
    LOG_LIMIT_MAX,
};

struct Fixture {
    store: Store,
    words: WordService,
    audit: AuditService,
    alice: User,
}

fn fixture() -> Fixture {
    let store = Store::open_in_memory().unwrap();
    let alice = AuthService::new(store.clone())
        .create_user("alice", "token-alice")
        .unwrap();
    Fixture {
        words: WordService::new(store.clone()),
        audit: AuditService::new(store.clone()),
        store,
        alice,
    }
}

fn sample_input() -> WordInput {
    WordInput::new()
        .spelling("skibidi")
        .definition(Definition::new("nonsense word").with_tags(["slang"]))
}

fn count_rows(store: &Store, table: &str) -> i64 {
    store
        .read(|conn| {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
                row.get(0)
            })
        })
        .unwrap()
}

#[test]
fn each_mutation_appends_exactly_one_entry() {
    let fx = fixture();

    let word = fx.words.create_word(fx.alice.id, &sample_input()).unwrap();
    fx.words
        .update_word(fx.alice.id, word.id, &WordInput::new().spelling("rizz"))
        .unwrap()
        .unwrap();
    assert!(fx.words.delete_word(fx.alice.id, word.id).unwrap());

    let logs = fx.audit.list_logs(None, 0).unwrap().items;
    let actions: Vec<_> = logs.iter().map(|entry| entry.action.as_str()).collect();
    assert_eq!(actions, vec!["delete_word", "update_word", "create_word"]);

    let expected_detail = format!("id={}", word.id);
    for entry in &logs {
        assert_eq!(entry.user_id, fx.alice.id);
        assert_eq!(entry.user, "alice");
        assert_eq!(entry.detail, expected_detail);
        assert!(entry.timestamp.ends_with('Z'), "{}", entry.timestamp);
    }
}

#[test]
fn reads_and_not_found_mutations_are_not_audited() {
    let fx = fixture();

    fx.words.list_words(None).unwrap();
    fx.words.get_word(1).unwrap();
    assert_eq!(
        fx.words
            .update_word(fx.alice.id, 404, &sample_input())
            .unwrap(),
        None
    );
    assert!(!fx.words.delete_word(fx.alice.id, 404).unwrap());

    assert_eq!(count_rows(&fx.store, "logs"), 0);
}

#[test]
fn rejected_mutation_is_not_audited() {
    let fx = fixture();

    let err = fx
        .words
        .create_word(fx.alice.id, &WordInput::new().spelling(" "))
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(count_rows(&fx.store, "logs"), 0);
    assert_eq!(count_rows(&fx.store, "words"), 0);
}

#[test]
fn failed_audit_append_rolls_back_the_mutation() {
    let fx = fixture();
    let unknown_user = fx.alice.id + 1000;

    assert!(fx.words.create_word(unknown_user, &sample_input()).is_err());
    assert_eq!(count_rows(&fx.store, "words"), 0);
    assert_eq!(count_rows(&fx.store, "spellings"), 0);

    let word = fx.words.create_word(fx.alice.id, &sample_input()).unwrap();
    assert!(fx.words.delete_word(unknown_user, word.id).is_err());
    assert_eq!(fx.words.get_word(word.id).unwrap(), Some(word));
    assert_eq!(count_rows(&fx.store, "logs"), 1);
}

#[test]
fn list_logs_clamps_limit_and_honors_offset() {
    let fx = fixture();
    for index in 0..305 {
        fx.audit
            .append_log(fx.alice.id, AuditAction::CreateWord, &format!("id={index}"))
            .unwrap();
    }

    let clamped = fx.audit.list_logs(Some(1000), 0).unwrap();
    assert_eq!(clamped.applied_limit, LOG_LIMIT_MAX);
    assert_eq!(clamped.items.len(), LOG_LIMIT_MAX as usize);

    let defaulted = fx.audit.list_logs(None, 0).unwrap();
    assert_eq!(defaulted.items.len(), 100);

    let page = fx.audit.list_logs(Some(2), 1).unwrap().items;
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].detail, "id=303");
    assert_eq!(page[1].detail, "id=302");
    assert!(page[0].id > page[1].id);

    assert!(fx.audit.list_logs(Some(0), 0).unwrap().items.is_empty());
    assert!(fx.audit.list_logs(None, 400).unwrap().items.is_empty());
}

#[test]
fn each_entry_names_its_own_actor() {
    let fx = fixture();
    let bob = AuthService::new(fx.store.clone())
        .create_user("bob", "token-bob")
        .unwrap();

    fx.words.create_word(fx.alice.id, &sample_input()).unwrap();
    fx.words.create_word(bob.id, &sample_input()).unwrap();

    let users: Vec<_> = fx
        .audit
        .list_logs(None, 0)
        .unwrap()
        .items
        .into_iter()
        .map(|entry| entry.user)
        .collect();
    assert_eq!(users, vec!["bob", "alice"]);
}
