//! SQLite catalog store.
//!
//! Owns the `categories` and `resources` tables. The unique index on
//! `resources(url, category_id)` is the authority for deduplication; the
//! existence check in [`CatalogStore::add_resource`] only saves a failed insert.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::data::CATEGORIES;
use super::errors::{CatalogError, CatalogResult};
use super::models::{Category, Resource};
use crate::common::{CategoryId, ResourceId};

/// Handle to the catalog database. Cheap to clone.
#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    /// Open (or create) the catalog file at `path` and initialize it.
    pub async fn connect(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(sqlx::Error::Io)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!(path = %path.display(), "Opened catalog database");
        Self::from_pool(pool).await
    }

    /// In-memory catalog (for testing).
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn in_memory() -> CatalogResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and run [`CatalogStore::initialize`].
    pub async fn from_pool(pool: SqlitePool) -> CatalogResult<Self> {
        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Create the tables if absent and seed the categories when the table is empty.
    pub async fn initialize(&self) -> CatalogResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                id INTEGER PRIMARY KEY,
                url TEXT NOT NULL,
                category_id INTEGER REFERENCES categories(id)
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_resources_url_category
                ON resources(url, category_id);
            CREATE INDEX IF NOT EXISTS idx_resources_category ON resources(category_id);
            "#,
        )
        .execute(&self.pool)
        .await?;

        let mut tx = self.pool.begin().await?;
        if Category::count(&mut *tx).await? == 0 {
            for entry in CATEGORIES.iter() {
                Category::insert(entry.value, &mut *tx).await?;
            }
            info!(count = CATEGORIES.len(), "Seeded catalog categories");
        }
        tx.commit().await?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn resolve_category_id(&self, name: &str) -> CatalogResult<Option<CategoryId>> {
        Ok(Category::find_by_name(name, &self.pool).await?.map(|c| c.id))
    }

    pub async fn resolve_category_name(&self, id: CategoryId) -> CatalogResult<Option<String>> {
        Ok(Category::find_by_id(id, &self.pool).await?.map(|c| c.name))
    }

    /// Index a link under a category.
    ///
    /// The category is resolved before the URL is checked, so an unknown
    /// category is reported as such whatever the URL looks like.
    pub async fn add_resource(&self, url: &str, category_name: &str) -> CatalogResult<ResourceId> {
        let category_id = self
            .resolve_category_id(category_name)
            .await?
            .ok_or_else(|| CatalogError::UnknownCategory {
                name: category_name.to_string(),
            })?;

        if !is_web_url(url) {
            return Err(CatalogError::InvalidInput {
                url: url.to_string(),
            });
        }

        if Resource::exists(url, category_id, &self.pool).await? {
            debug!(url = %url, category = %category_name, "Resource already indexed");
            return Err(CatalogError::DuplicateResource {
                url: url.to_string(),
                category: category_name.to_string(),
            });
        }

        self.insert_resource(url, category_id, category_name).await
    }

    /// Insert without the existence check; the unique index decides.
    async fn insert_resource(
        &self,
        url: &str,
        category_id: CategoryId,
        category_name: &str,
    ) -> CatalogResult<ResourceId> {
        let id = match Resource::insert(url, category_id, &self.pool).await {
            Ok(id) => id,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(url = %url, category = %category_name, "Insert hit unique index");
                return Err(CatalogError::DuplicateResource {
                    url: url.to_string(),
                    category: category_name.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            resource_id = %id,
            category_id = %category_id,
            url = %url,
            "Resource added"
        );
        Ok(id)
    }

    /// Every category that has at least one resource, with its distinct URLs
    pub async fn list_all_resources(&self) -> CatalogResult<BTreeMap<CategoryId, BTreeSet<String>>> {
        let mut grouped: BTreeMap<CategoryId, BTreeSet<String>> = BTreeMap::new();
        for resource in Resource::find_all(&self.pool).await? {
            grouped
                .entry(resource.category_id)
                .or_default()
                .insert(resource.url);
        }
        Ok(grouped)
    }

    /// URLs of one category in insertion order; empty when the category is unknown
    pub async fn list_resources_by_category(&self, category_name: &str) -> CatalogResult<Vec<String>> {
        let Some(category_id) = self.resolve_category_id(category_name).await? else {
            return Ok(Vec::new());
        };

        Ok(Resource::find_by_category(category_id, &self.pool)
            .await?
            .into_iter()
            .map(|r| r.url)
            .collect())
    }
}

/// Only `http://` and `https://` links are accepted
pub fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
