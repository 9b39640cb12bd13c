use figment::{Figment, Provider, providers::Env};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;
use url::Url;

/// Runtime configuration for the schema initializer.
///
/// Built once in `main` and handed to the initializer; nothing reads process
/// globals after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    #[serde(default)]
    pub app_env: Option<String>,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_loglevel() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
        }
    }
}

impl Config {
    /// Load from the process environment.
    ///
    /// `NODE_ENV` is accepted as an alias of `APP_ENV`; `APP_ENV` wins when
    /// both are present.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Env::raw().only(&["node_env"]).map(|_| "app_env".into()))
                .merge(Env::raw().only(&["database_url", "app_env", "loglevel"])),
        )
    }

    pub fn from_figment(provider: impl Provider) -> Result<Self, figment::Error> {
        Figment::from(provider).extract()
    }

    pub fn environment(&self) -> AppEnvironment {
        match self.app_env.as_deref() {
            Some(env) if env.trim().eq_ignore_ascii_case("production") => {
                AppEnvironment::Production
            }
            _ => AppEnvironment::Development,
        }
    }

    /// Production connects over TLS without verifying the server certificate
    /// chain; every other environment connects in plaintext.
    pub fn ssl_mode(&self) -> PgSslMode {
        match self.environment() {
            AppEnvironment::Production => PgSslMode::Require,
            AppEnvironment::Development => PgSslMode::Disable,
        }
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        Ok(PgConnectOptions::from_str(&self.database_url)?.ssl_mode(self.ssl_mode()))
    }

    /// Connection string with any password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        match Url::parse(&self.database_url) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.to_string()
            }
            Err(_) => "<unparseable>".to_string(),
        }
    }
}
