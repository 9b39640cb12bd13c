use crate::config::Config;
use crate::db::schema::{MANAGED_TABLES, MARKER_TABLE, POSTGRES_INIT};
use crate::db::{PgSchemaStore, SchemaStore};
use crate::error::BootstrapError;
use tracing::{info, warn};

/// Managed table that exists but lacks some expected columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDrift {
    pub table: &'static str,
    pub missing_columns: Vec<&'static str>,
}

/// Outcome of one initializer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    /// True when the DDL batch was issued during this run.
    pub created: bool,
    pub tables: Vec<String>,
    pub drift: Vec<TableDrift>,
}

/// Connect with `config`, ensure the site tables exist, then disconnect.
pub async fn ensure_schema(config: &Config) -> Result<SchemaReport, BootstrapError> {
    info!(
        database_url = %config.redacted_database_url(),
        environment = config.environment().as_str(),
        "Starting PostgreSQL migration..."
    );
    let store = PgSchemaStore::connect(config).await?;
    info!("Connected to PostgreSQL database");
    SchemaInitializer::new(store).run().await
}

/// Check-then-create driver over any [`SchemaStore`].
pub struct SchemaInitializer<S> {
    store: S,
}

impl<S: SchemaStore> SchemaInitializer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run [`Self::initialize`] and release the store on every path.
    pub async fn run(mut self) -> Result<SchemaReport, BootstrapError> {
        let result = self.initialize().await;
        if let Err(e) = self.store.close().await {
            warn!(error = %e, "failed to close database connection");
        }
        if result.is_ok() {
            info!("Migration completed successfully");
        }
        result
    }

    pub async fn initialize(&mut self) -> Result<SchemaReport, BootstrapError> {
        let exists = self
            .store
            .table_exists(MARKER_TABLE)
            .await
            .map_err(BootstrapError::query("check marker table"))?;

        let created = if !exists {
            info!("Creating database tables...");
            self.store
                .apply_batch(POSTGRES_INIT)
                .await
                .map_err(BootstrapError::SchemaCreation)?;
            info!("Database tables created successfully");
            true
        } else {
            info!("Database tables already exist");
            false
        };

        let tables = self
            .store
            .list_tables()
            .await
            .map_err(BootstrapError::query("list tables"))?;
        info!("Tables in database:");
        for table in &tables {
            info!(table = %table, "-");
        }

        let drift = self.detect_drift(&tables).await?;

        Ok(SchemaReport {
            created,
            tables,
            drift,
        })
    }

    /// Compare each listed managed table against its expected columns.
    /// Drift is reported, never repaired.
    async fn detect_drift(&mut self, tables: &[String]) -> Result<Vec<TableDrift>, BootstrapError> {
        let mut drift = Vec::new();
        for expected in MANAGED_TABLES {
            if !tables.iter().any(|t| t == expected.name) {
                warn!(table = expected.name, "managed table is missing");
                continue;
            }
            let present = self
                .store
                .table_columns(expected.name)
                .await
                .map_err(BootstrapError::query("inspect columns"))?;
            let missing_columns: Vec<&'static str> = expected
                .columns
                .iter()
                .copied()
                .filter(|c| !present.iter().any(|p| p == c))
                .collect();
            if !missing_columns.is_empty() {
                warn!(
                    table = expected.name,
                    missing = ?missing_columns,
                    "table does not match the expected definition"
                );
                drift.push(TableDrift {
                    table: expected.name,
                    missing_columns,
                });
            }
        }
        Ok(drift)
    }
}
