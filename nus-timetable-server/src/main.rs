mod handlers;
mod server;

use std::{env, sync::Arc};

use anyhow::Result;
use nus_timetable_core::catalog::{DEFAULT_API_ROOT, ModuleCatalog, NusmodsSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nus_timetable_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Upstream API root, overridable for other academic years
    let api_root = env::var("NUSMODS_API_URL").unwrap_or_else(|_| DEFAULT_API_ROOT.to_string());
    tracing::info!("using NUSMods API root: {}", api_root);

    let catalog = Arc::new(ModuleCatalog::new(Arc::new(NusmodsSource::new(api_root))));

    server::start_server(catalog).await
}
