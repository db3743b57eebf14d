use sqlx::{SqliteExecutor, SqlitePool};

use crate::common::CategoryId;

/// A catalog category row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Find by persisted name. Older files can hold the same name more than once;
    /// the lowest id wins.
    pub async fn find_by_name(name: &str, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name FROM categories WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(id: CategoryId, pool: &SqlitePool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_all(pool: &SqlitePool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn count<'e>(executor: impl SqliteExecutor<'e>) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(executor)
            .await
    }

    /// Insert a category name, returning its new id
    pub async fn insert<'e>(name: &str, executor: impl SqliteExecutor<'e>) -> sqlx::Result<CategoryId> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(executor)
            .await?;
        Ok(CategoryId::from_raw(result.last_insert_rowid()))
    }
}
