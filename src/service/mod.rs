pub mod schema_init;

pub use schema_init::{SchemaInitializer, SchemaReport, TableDrift, ensure_schema};
