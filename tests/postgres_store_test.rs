//! Postgres backend tests. They need a disposable database named by
//! `NOTES_TEST_PG_DSN` and return early without one.

use scratchpad::store::{Key, KvStore, PostgresStore};

async fn connect() -> Option<PostgresStore> {
    let dsn = std::env::var("NOTES_TEST_PG_DSN").ok()?;

    Some(
        PostgresStore::connect(&dsn)
            .await
            .expect("Failed to connect to database"),
    )
}

fn namespace(test: &str) -> String {
    format!("test-{test}-{}", std::process::id())
}

#[tokio::test]
async fn test_nul_characters_round_trip() {
    let Some(store) = connect().await else {
        return;
    };
    let namespace = namespace("nul");
    let key = Key::new(&namespace, "a\0b");

    store.set(&key, "line\0one").await.expect("set");

    assert_eq!(
        store.get(&key).await.expect("get").as_deref(),
        Some("line\0one")
    );
    let records = store.list(&namespace).await.expect("list");
    assert_eq!(records, vec![(key.clone(), "line\0one".to_string())]);

    store.delete(&key).await.expect("delete");
    store.close().await.expect("close");
}

#[tokio::test]
async fn test_upsert_delete_and_ordering() {
    let Some(store) = connect().await else {
        return;
    };
    let namespace = namespace("order");

    store.set(&Key::new(&namespace, "b"), "2").await.expect("set");
    store.set(&Key::new(&namespace, "a"), "1").await.expect("set");
    store.set(&Key::new(&namespace, "a"), "one").await.expect("set");
    store.delete(&Key::new(&namespace, "missing")).await.expect("delete");

    let records = store.list(&namespace).await.expect("list");
    let ids: Vec<&str> = records.iter().map(|(key, _)| key.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(records[0].1, "one");

    for (key, _) in records {
        store.delete(&key).await.expect("delete");
    }
    store.close().await.expect("close");
}
