use sqlx::SqlitePool;

use crate::common::{CategoryId, ResourceId};

/// An indexed link. Unique per (url, category_id).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Resource {
    pub id: ResourceId,
    pub url: String,
    pub category_id: CategoryId,
}

impl Resource {
    pub async fn exists(url: &str, category_id: CategoryId, pool: &SqlitePool) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM resources WHERE url = ? AND category_id = ?)",
        )
        .bind(url)
        .bind(category_id)
        .fetch_one(pool)
        .await
        .map(|found| found != 0)
    }

    /// Insert a row. A unique-index violation surfaces as a database error
    /// the caller can check with `is_unique_violation()`.
    pub async fn insert(url: &str, category_id: CategoryId, pool: &SqlitePool) -> sqlx::Result<ResourceId> {
        let result = sqlx::query("INSERT INTO resources (url, category_id) VALUES (?, ?)")
            .bind(url)
            .bind(category_id)
            .execute(pool)
            .await?;
        Ok(ResourceId::from_raw(result.last_insert_rowid()))
    }

    /// All rows with a category, oldest first
    pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, url, category_id FROM resources WHERE category_id IS NOT NULL ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_category(category_id: CategoryId, pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, url, category_id FROM resources WHERE category_id = ? ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }
}
