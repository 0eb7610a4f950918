use std::path::PathBuf;

use tracing::error;
use tracing_subscriber::EnvFilter;

use query_resolve::server;
use query_resolve::settings::Settings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    // optional path to a TOML settings file
    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = match Settings::load(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "could not load settings");
            std::process::exit(1);
        }
    };
    if let Err(e) = server::serve(&settings).await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
