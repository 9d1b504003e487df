use std::{env, fmt::Display, str::FromStr, time::Duration};

use cf_dashboard_core::codeforces::CONTEST_LIST_URL;
use cf_dashboard_core::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub bind_addr: String,
    pub db_path: String,
    pub static_dir: String,
    pub request_timeout: Option<Duration>,
    pub page_size: usize,
}

impl Config {
    pub fn load() -> Self {
        let page_size = try_load("CF_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        let page_size = if PAGE_SIZES.contains(&page_size) {
            page_size
        } else {
            warn!("CF_PAGE_SIZE must be one of {:?}, using {}", PAGE_SIZES, DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        };

        Self {
            api_url: try_load("CF_API_URL", CONTEST_LIST_URL.to_string()),
            bind_addr: try_load("CF_BIND_ADDR", "127.0.0.1:3000".to_string()),
            db_path: try_load("CF_DB_PATH", "cf_dashboard.db".to_string()),
            static_dir: try_load("CF_STATIC_DIR", "crates/web/static".to_string()),
            request_timeout: optional::<u64>("CF_REQUEST_TIMEOUT_SECS").map(Duration::from_secs),
            page_size,
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn optional<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(key).ok()?;
    raw.parse()
        .map_err(|e| warn!("Invalid {key} value: {e}, ignoring"))
        .ok()
}
