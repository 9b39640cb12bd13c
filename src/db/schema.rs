//! SQL DDL for initializing the site database.
//! PostgreSQL only; every statement is guarded by `IF NOT EXISTS`.

/// Table whose presence means the schema was already initialized.
pub const MARKER_TABLE: &str = "sessions";

/// PostgreSQL schema with:
/// - `sessions`, `pages`, `counters`, `assets` keyed by caller-chosen TEXT ids
/// - `articles` keyed by SERIAL `article_id`, `slug` UNIQUE
/// - `pages.updated_at` required; `assets.updated_at` and the article
///   timestamps nullable
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    expires TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS pages (
    page_id TEXT PRIMARY KEY,
    data JSONB NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS counters (
    counter_id TEXT PRIMARY KEY,
    count INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS assets (
    asset_id TEXT PRIMARY KEY,
    mime_type TEXT NOT NULL,
    updated_at TIMESTAMP DEFAULT NULL,
    size INTEGER NOT NULL,
    data BYTEA NOT NULL
);

CREATE TABLE IF NOT EXISTS articles (
    article_id SERIAL PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    title TEXT NOT NULL,
    teaser TEXT NOT NULL,
    content TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    published_at TIMESTAMP,
    updated_at TIMESTAMP
);
"#;

/// Expected column set of one managed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Tables created by [`POSTGRES_INIT`], in creation order.
pub const MANAGED_TABLES: &[TableSpec] = &[
    TableSpec {
        name: "sessions",
        columns: &["session_id", "expires"],
    },
    TableSpec {
        name: "pages",
        columns: &["page_id", "data", "updated_at"],
    },
    TableSpec {
        name: "counters",
        columns: &["counter_id", "count"],
    },
    TableSpec {
        name: "assets",
        columns: &["asset_id", "mime_type", "updated_at", "size", "data"],
    },
    TableSpec {
        name: "articles",
        columns: &[
            "article_id",
            "slug",
            "title",
            "teaser",
            "content",
            "created_at",
            "published_at",
            "updated_at",
        ],
    },
];

/// Names of every table `sql` would create, in statement order.
///
/// Test helper: lets in-memory `SchemaStore` fakes mirror what a DDL batch
/// would create. The initializer itself never parses SQL.
pub fn created_tables(sql: &str) -> Vec<&str> {
    const PREFIX: &str = "CREATE TABLE IF NOT EXISTS ";
    sql.split(';')
        .filter_map(|stmt| stmt.trim().strip_prefix(PREFIX))
        .filter_map(|rest| rest.split(|c: char| c.is_whitespace() || c == '(').next())
        .filter(|name| !name.is_empty())
        .collect()
}
