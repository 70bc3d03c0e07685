//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use fairway_core::MenuCategory;

use crate::config::ClubConfig;
use crate::models::MenuItem;

/// How long the public menu listing is cached.
const MENU_CACHE_TTL: Duration = Duration::from_secs(300);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClubConfig,
    pool: PgPool,
    // The menu card changes rarely and is read on every dining screen
    menu_cache: Cache<Option<MenuCategory>, Arc<Vec<MenuItem>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ClubConfig, pool: PgPool) -> Self {
        let menu_cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(MENU_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                menu_cache,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ClubConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the cached public menu listing.
    #[must_use]
    pub fn menu_cache(&self) -> &Cache<Option<MenuCategory>, Arc<Vec<MenuItem>>> {
        &self.inner.menu_cache
    }

    /// Drop all cached menu listings. Called after any menu write.
    pub fn invalidate_menu_cache(&self) {
        self.inner.menu_cache.invalidate_all();
    }
}
