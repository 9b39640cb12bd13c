use crate::config::Config;
use crate::db::SchemaStore;
use crate::error::BootstrapError;
use sqlx::{Connection, PgConnection};
use tracing::debug;

const TABLE_EXISTS_SQL: &str = r#"
SELECT EXISTS (
    SELECT FROM information_schema.tables
    WHERE table_schema = 'public'
    AND table_name = $1
)
"#;

// information_schema exposes `sql_identifier`; cast so it decodes as String.
const LIST_TABLES_SQL: &str = r#"
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = 'public'
ORDER BY table_name
"#;

const TABLE_COLUMNS_SQL: &str = r#"
SELECT column_name::text
FROM information_schema.columns
WHERE table_schema = 'public'
AND table_name = $1
ORDER BY ordinal_position
"#;

/// `SchemaStore` backed by one PostgreSQL connection.
pub struct PgSchemaStore {
    conn: PgConnection,
}

impl PgSchemaStore {
    /// Open a connection using the TLS policy selected by `config`.
    pub async fn connect(config: &Config) -> Result<Self, BootstrapError> {
        let options = config
            .connect_options()
            .map_err(BootstrapError::InvalidDatabaseUrl)?;
        debug!(ssl_mode = ?config.ssl_mode(), "opening database connection");
        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(BootstrapError::Connection)?;
        Ok(Self { conn })
    }
}

impl SchemaStore for PgSchemaStore {
    async fn table_exists(&mut self, table: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(TABLE_EXISTS_SQL)
            .bind(table)
            .fetch_one(&mut self.conn)
            .await
    }

    async fn apply_batch(&mut self, ddl: &str) -> Result<(), sqlx::Error> {
        // Postgres DDL is transactional: a rejected statement leaves nothing behind.
        let mut tx = self.conn.begin().await?;
        sqlx::raw_sql(ddl).execute(&mut *tx).await?;
        tx.commit().await
    }

    async fn list_tables(&mut self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(LIST_TABLES_SQL)
            .fetch_all(&mut self.conn)
            .await
    }

    async fn table_columns(&mut self, table: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(TABLE_COLUMNS_SQL)
            .bind(table)
            .fetch_all(&mut self.conn)
            .await
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}
