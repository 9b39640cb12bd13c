pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod ui;

pub use config::Config;
pub use error::BootstrapError;
pub use service::{SchemaInitializer, SchemaReport, ensure_schema};
