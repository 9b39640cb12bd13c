//! Database module: schema definition and store access.
//!
//! Layout:
//! - `schema.rs`: SQL DDL and the expected column sets
//! - `postgres.rs`: `SchemaStore` over a single PostgreSQL connection

pub mod postgres;
pub mod schema;

pub use postgres::PgSchemaStore;
pub use schema::{MANAGED_TABLES, MARKER_TABLE, POSTGRES_INIT, TableSpec};

/// The handful of operations the initializer needs from a relational store.
///
/// Implementations own their connection; `close` consumes the store so a
/// released connection cannot be used again.
#[allow(async_fn_in_trait)]
pub trait SchemaStore {
    /// Whether `table` exists in the `public` schema.
    async fn table_exists(&mut self, table: &str) -> Result<bool, sqlx::Error>;

    /// Execute a multi-statement DDL batch atomically.
    async fn apply_batch(&mut self, ddl: &str) -> Result<(), sqlx::Error>;

    /// Every table name in the `public` schema, ordered by name.
    async fn list_tables(&mut self) -> Result<Vec<String>, sqlx::Error>;

    /// Column names of `table` in the `public` schema.
    async fn table_columns(&mut self, table: &str) -> Result<Vec<String>, sqlx::Error>;

    async fn close(self) -> Result<(), sqlx::Error>;
}
