//! Integration tests for recording and searching sessions on disk

use super::common::determinism::{test_now, TestClock};
use super::common::fixtures::{create_test_store, failed_session, open_store, successful_session};
use erst::{Network, SearchFilters, Session, StoreError, StoreErrorKind};

fn hashes(sessions: &[Session]) -> Vec<&str> {
    sessions.iter().map(Session::tx_hash).collect()
}

#[test]
fn test_search_by_contract() {
    let (_db, store, _dir) = create_test_store();
    store
        .save_session(&Session::new(
            "abc",
            Network::Testnet,
            test_now(),
            "",
            r#"[{"contract":"C123"}]"#,
            "[]",
        ))
        .unwrap();

    let found = store
        .search_sessions(&SearchFilters::new().with_contract("C123"))
        .unwrap();
    assert_eq!(hashes(&found), vec!["abc"]);
    assert_eq!(found[0].network(), Network::Testnet);

    let missing = store
        .search_sessions(&SearchFilters::new().with_contract("C999"))
        .unwrap();
    assert!(missing.is_empty());
}

#[test]
fn test_search_by_error_text_and_pattern() {
    let (_db, store, _dir) = create_test_store();
    store
        .save_session(&failed_session(
            "abc",
            test_now(),
            "trap: out of gas",
            "C123",
            "transfer",
        ))
        .unwrap();

    let cases = [
        ("out of gas", false, true),
        ("^trap:", true, true),
        ("^gas", true, false),
    ];
    for (pattern, use_regex, expected) in cases {
        let found = store
            .search_sessions(&SearchFilters::new().with_error(pattern).with_regex(use_regex))
            .unwrap();
        assert_eq!(!found.is_empty(), expected, "pattern {pattern:?}");
    }
}

#[test]
fn test_repeat_debugging_keeps_every_session_newest_first() {
    let (_db, store, _dir) = create_test_store();
    let clock = TestClock::new();
    let earlier = clock.tick();
    let later = clock.tick();

    // Saved out of chronological order on purpose
    store
        .save_session(&failed_session("xyz", later, "second", "C1", "t"))
        .unwrap();
    store
        .save_session(&failed_session("xyz", earlier, "first", "C1", "t"))
        .unwrap();

    let all = store.search_sessions(&SearchFilters::new()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].error(), "second");
    assert_eq!(all[0].timestamp(), later);
    assert_eq!(all[1].error(), "first");
}

#[test]
fn test_filters_combine_with_and() {
    let (_db, store, _dir) = create_test_store();
    let clock = TestClock::new();
    for session in [
        failed_session("a", clock.tick(), "trap: out of gas", "C1", "transfer"),
        failed_session("b", clock.tick(), "trap: out of gas", "C2", "transfer"),
        failed_session("c", clock.tick(), "panic: overflow", "C1", "mint"),
        successful_session("d", clock.tick()),
    ] {
        store.save_session(&session).unwrap();
    }

    let found = store
        .search_sessions(
            &SearchFilters::new()
                .with_error("out of gas")
                .with_contract("C1")
                .with_event("transfer"),
        )
        .unwrap();
    assert_eq!(hashes(&found), vec!["a"]);

    let failed = store
        .search_sessions(&SearchFilters::new().with_error(".").with_regex(true))
        .unwrap();
    assert_eq!(hashes(&failed), vec!["c", "b", "a"]);

    let everything = store.search_sessions(&SearchFilters::new()).unwrap();
    assert_eq!(hashes(&everything), vec!["d", "c", "b", "a"]);
}

#[test]
fn test_sessions_survive_reopen() {
    let (db, store, _dir) = create_test_store();
    store
        .save_session(&failed_session("abc", test_now(), "trap", "C1", "t"))
        .unwrap();
    drop(store);

    let reopened = open_store(&db.path);
    let found = reopened.search_sessions(&SearchFilters::new()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].events(), r#"[{"contract":"C1","topics":["t"]}]"#);
    assert_eq!(found[0].decoded_logs().unwrap(), vec!["host fn invoked"]);
}

#[test]
fn test_concurrent_writers_on_one_file() {
    let (db, _store, _dir) = create_test_store();
    let path = db.path.clone();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let path = path.clone();
            std::thread::spawn(move || {
                let store = open_store(&path);
                for i in 0..10 {
                    let hash = format!("w{worker}-{i}");
                    store
                        .save_session(&successful_session(&hash, test_now()))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = open_store(&path);
    assert_eq!(store.count().unwrap(), 40);
    assert_eq!(store.search_sessions(&SearchFilters::new()).unwrap().len(), 40);
}

#[test]
fn test_invalid_pattern_is_a_query_error() {
    let (_db, store, _dir) = create_test_store();
    store
        .save_session(&failed_session("abc", test_now(), "trap", "C1", "t"))
        .unwrap();

    let err = store
        .search_sessions(&SearchFilters::new().with_event("[unclosed").with_regex(true))
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Query);
    assert!(matches!(err, StoreError::InvalidPattern { .. }));
}
