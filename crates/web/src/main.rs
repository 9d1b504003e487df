use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cf_dashboard_core::{
    CodeforcesClient, ContestCache, ContestSource, DashboardSession, Database, FavoritesStore,
    KeyValueStore,
};

mod config;
mod error;
mod routes;

use config::Config;
use error::WebError;

pub type Favorites = FavoritesStore<Box<dyn KeyValueStore + Send>>;

pub struct AppState {
    pub source: Arc<dyn ContestSource>,
    pub cache: Mutex<ContestCache>,
    pub favorites: Mutex<Favorites>,
    pub session: Mutex<DashboardSession>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ContestSource>,
        storage: Box<dyn KeyValueStore + Send>,
        page_size: usize,
    ) -> Result<Self, WebError> {
        Ok(Self {
            source,
            cache: Mutex::new(ContestCache::new()),
            favorites: Mutex::new(FavoritesStore::open(storage)?),
            session: Mutex::new(DashboardSession::new(page_size)?),
        })
    }
}

pub fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, WebError> {
    mutex.lock().map_err(|_| WebError::StatePoisoned)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();

    let client = CodeforcesClient::with_endpoint(&config.api_url, config.request_timeout)
        .expect("Failed to create HTTP client");
    let db = Database::open(&config.db_path).expect("Failed to open database");

    let state = AppState::new(Arc::new(client), Box::new(db), config.page_size)
        .expect("Failed to initialize dashboard state");

    let app = routes::router(Arc::new(state), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");

    info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
