// finquery entry point: load the filings table once, then serve the question form.
use engine::config::settings::EngineSettings;
use engine::data::financial_table::FinancialTable;
use engine::services::routes;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config file: first CLI argument, else FINQUERY_CONFIG, else built-in defaults.
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("FINQUERY_CONFIG").map(PathBuf::from));
    let settings = EngineSettings::load(config_path.as_deref())?.apply_env_overrides()?;

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(settings.log_level.parse()?))
        .init();

    info!("Starting finquery engine...");
    if let Some(path) = &config_path {
        info!(config = %path.display(), "Loaded configuration file");
    }

    // Startup failures (unreadable file, bad header, missing column) end the process here.
    let table = Arc::new(FinancialTable::load(&settings.data_path, settings.delimiter_byte()?)?);

    let addr = settings.socket_addr()?;
    info!("Engine will listen on http://{}", addr);

    warp::serve(routes(table)).run(addr).await;

    Ok(())
}
