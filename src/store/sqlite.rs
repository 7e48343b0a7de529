use tracing::debug;

use crate::db::repositories::kv_repository::KvRepository;
use crate::db::DbPool;
use crate::error::AppResult;

use super::KeyValueStore;

#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    db: DbPool,
}

impl SqliteKeyValueStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let row = self.db.with_connection(|conn| KvRepository::get(conn, key))?;
        Ok(row.map(|row| row.value))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        debug!(target: "app::db", key, bytes = value.len(), "kv upsert");
        self.db
            .with_connection(|conn| KvRepository::upsert(conn, key, value))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.db.with_connection(|conn| KvRepository::delete(conn, key))
    }
}
