//! Runs against a real server when `TEST_DATABASE_URL` is set; skipped otherwise.
//! The target database should be disposable: the tests drop the site tables.

use site_bootstrap::db::schema::MANAGED_TABLES;
use site_bootstrap::db::{PgSchemaStore, SchemaStore};
use site_bootstrap::{BootstrapError, Config, SchemaInitializer};
use sqlx::{Connection, PgConnection};

fn test_config() -> Option<Config> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;
    Some(Config {
        database_url,
        app_env: None,
        loglevel: "debug".to_string(),
    })
}

async fn reset(cfg: &Config) {
    let mut conn = PgConnection::connect(&cfg.database_url)
        .await
        .expect("failed to connect for reset");
    sqlx::raw_sql(
        "DROP TABLE IF EXISTS sessions, pages, counters, assets, articles;\n         DROP SEQUENCE IF EXISTS articles_article_id_seq;",
    )
        .execute(&mut conn)
        .await
        .expect("failed to drop site tables");
    conn.close().await.expect("failed to close reset connection");
}

// One test so the drop/create cycles never interleave.
#[tokio::test]
async fn initializes_real_database() {
    let Some(cfg) = test_config() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    reset(&cfg).await;

    let first = site_bootstrap::ensure_schema(&cfg).await.expect("first run");
    assert!(first.created);
    for expected in MANAGED_TABLES {
        assert!(first.tables.iter().any(|t| t == expected.name), "{} missing", expected.name);
    }
    assert!(first.drift.is_empty());

    let second = site_bootstrap::ensure_schema(&cfg).await.expect("second run");
    assert!(!second.created);
    assert_eq!(first.tables, second.tables);

    let mut store = PgSchemaStore::connect(&cfg).await.expect("connect");
    for expected in MANAGED_TABLES {
        let columns = store.table_columns(expected.name).await.expect("columns");
        assert_eq!(columns, expected.columns, "{} columns", expected.name);
    }
    store.close().await.expect("close");

    let mut conn = PgConnection::connect(&cfg.database_url).await.expect("connect");
    let insert = "INSERT INTO articles (slug, title, teaser) VALUES ('hello', 'Hello', 'Hi')";
    sqlx::query(insert).execute(&mut conn).await.expect("first insert");
    let duplicate = sqlx::query(insert).execute(&mut conn).await;
    let err = duplicate.expect_err("duplicate slug must be rejected");
    let code = err
        .as_database_error()
        .and_then(|e| e.code())
        .map(|c| c.into_owned());
    assert_eq!(code.as_deref(), Some("23505"));
    conn.close().await.expect("close");

    // Reports drift on an existing table without touching it.
    reset(&cfg).await;
    let mut conn = PgConnection::connect(&cfg.database_url).await.expect("connect");
    sqlx::raw_sql("CREATE TABLE sessions (session_id TEXT PRIMARY KEY)")
        .execute(&mut conn)
        .await
        .expect("create drifted sessions");
    conn.close().await.expect("close");

    let store = PgSchemaStore::connect(&cfg).await.expect("connect");
    let report = SchemaInitializer::new(store).run().await.expect("drifted run");
    assert!(!report.created);
    assert_eq!(report.drift.len(), 1);
    assert_eq!(report.drift[0].missing_columns, vec!["expires"]);

    // A batch rejected at its last statement leaves no tables behind.
    reset(&cfg).await;
    let mut conn = PgConnection::connect(&cfg.database_url).await.expect("connect");
    sqlx::raw_sql("CREATE SEQUENCE articles_article_id_seq")
        .execute(&mut conn)
        .await
        .expect("create colliding sequence");
    conn.close().await.expect("close");

    let err = site_bootstrap::ensure_schema(&cfg)
        .await
        .expect_err("articles SERIAL should collide with the sequence");
    assert!(matches!(err, BootstrapError::SchemaCreation(_)), "{err:?}");

    let mut store = PgSchemaStore::connect(&cfg).await.expect("connect");
    for expected in MANAGED_TABLES {
        let exists = store.table_exists(expected.name).await.expect("exists");
        assert!(!exists, "{} left behind by a rejected batch", expected.name);
    }
    store.close().await.expect("close");

    reset(&cfg).await;
}
