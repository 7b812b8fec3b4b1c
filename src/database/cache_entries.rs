//! Cache entry database operations
//!
//! Values are stored as JSON text; `stored_at` is Unix milliseconds.

use super::Database;
use sqlx::Row;

/// One row of the `cache_entries` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryRecord {
    pub key: String,
    pub value: String,
    pub stored_at: i64,
}

/// Extension trait for cache entry database operations
pub trait CacheEntryOps {
    fn get_cache_entry(&self, key: &str) -> impl std::future::Future<Output = Result<Option<CacheEntryRecord>, sqlx::Error>> + Send;
    fn put_cache_entry(&self, record: &CacheEntryRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn delete_cache_entry(&self, key: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn clear_cache_entries(&self) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn list_cache_keys(&self) -> impl std::future::Future<Output = Result<Vec<String>, sqlx::Error>> + Send;
}

impl CacheEntryOps for Database {
    async fn get_cache_entry(&self, key: &str) -> Result<Option<CacheEntryRecord>, sqlx::Error> {
        let row = sqlx::query("SELECT key, value, stored_at FROM cache_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(|r| CacheEntryRecord {
            key: r.get("key"),
            value: r.get("value"),
            stored_at: r.get("stored_at"),
        }))
    }

    async fn put_cache_entry(&self, record: &CacheEntryRecord) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT OR REPLACE INTO cache_entries (key, value, stored_at) VALUES (?, ?, ?)")
            .bind(&record.key)
            .bind(&record.value)
            .bind(record.stored_at)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn delete_cache_entry(&self, key: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM cache_entries WHERE key = ?")
            .bind(key)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn clear_cache_entries(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM cache_entries")
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn list_cache_keys(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query("SELECT key FROM cache_entries ORDER BY key")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(|r| r.get("key")).collect())
    }
}
