use mimalloc::MiMalloc;
use site_bootstrap::{BootstrapError, Config};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env();
    let loglevel = cfg
        .as_ref()
        .map(|c| c.loglevel.clone())
        .unwrap_or_else(|_| "info".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let result = match cfg {
        Ok(cfg) => site_bootstrap::ensure_schema(&cfg).await,
        Err(e) => Err(BootstrapError::from(e)),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(phase = e.phase(), error = %e, "Error during migration");
            ExitCode::FAILURE
        }
    }
}
