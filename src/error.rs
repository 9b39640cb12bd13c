use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(#[source] SqlxError),

    #[error("Failed to connect to database: {0}")]
    Connection(#[source] SqlxError),

    #[error("Query failed during {phase}: {source}")]
    Query {
        phase: &'static str,
        #[source]
        source: SqlxError,
    },

    #[error("Failed to create schema: {0}")]
    SchemaCreation(#[source] SqlxError),
}

impl BootstrapError {
    pub fn query(phase: &'static str) -> impl FnOnce(SqlxError) -> Self {
        move |source| BootstrapError::Query { phase, source }
    }

    /// Step of the run that failed, for log context.
    pub fn phase(&self) -> &'static str {
        match self {
            BootstrapError::Config(_) => "load configuration",
            BootstrapError::InvalidDatabaseUrl(_) | BootstrapError::Connection(_) => "connect",
            BootstrapError::Query { phase, .. } => phase,
            BootstrapError::SchemaCreation(_) => "create tables",
        }
    }
}
