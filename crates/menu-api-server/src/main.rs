use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use menu_api_server::{
    build_router,
    config::{DatabaseBackend, Settings},
    database::{DbPool, InMemoryMenuStore, MenuStore, PgMenuStore},
    services::GoogleTranslateClient,
    storage::LocalObjectStorage,
    utils::logger::init_logger,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logger()?;

    info!("Starting menu API server...");

    let settings = Settings::load()?;
    info!("Configuration loaded");

    let store: Arc<dyn MenuStore> = match settings.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DbPool::new(&settings.database).await?;
            info!("Database connection established");
            let store = PgMenuStore::new(pool);
            store.ensure_schema().await?;
            Arc::new(store)
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory menu store; data is lost on exit");
            Arc::new(InMemoryMenuStore::new())
        }
    };

    tokio::fs::create_dir_all(&settings.storage.root).await?;
    let storage = Arc::new(LocalObjectStorage::new(
        &settings.storage.root,
        &settings.storage.public_base_url,
    ));

    let translation_api = Arc::new(GoogleTranslateClient::new(settings.translation.clone()));

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    let state = AppState::new(settings, store, storage, translation_api);
    let app = build_router(state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
