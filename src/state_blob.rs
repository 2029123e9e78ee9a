//! Per-user autosave storage
//!
//! Each user has at most one blob. Saving overwrites it; there is no history.

use crate::db::{tables, Db};
use crate::error::Result;
use crate::models::{now_micros, StatePayload, StateRecord, UserId};

pub struct StateStore {
    db: Db,
}

impl StateStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Fetch the user's blob, `None` if they never saved one
    pub fn get(&self, user_id: UserId) -> Result<Option<StateRecord>> {
        let read_txn = self.db.begin_read()?;
        let states = read_txn.open_table(tables::USER_STATES)?;
        let record = states
            .get(user_id)?
            .map(|bytes| bincode::deserialize::<StateRecord>(bytes.value()))
            .transpose()?;
        Ok(record)
    }

    /// Create or overwrite the user's blob and return the stored record
    pub fn put(&self, user_id: UserId, payload: StatePayload) -> Result<StateRecord> {
        let record = StateRecord {
            content: payload.into_blob_text(),
            updated_at: now_micros(),
        };
        let bytes = bincode::serialize(&record)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut states = write_txn.open_table(tables::USER_STATES)?;
            states.insert(user_id, bytes.as_slice())?;
        }
        write_txn.commit()?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, StateStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = open_database(temp_dir.path().join("test.db")).unwrap();
        (temp_dir, StateStore::new(db))
    }

    #[test]
    fn test_get_before_any_save() {
        let (_dir, store) = test_store();

        assert!(store.get(1).unwrap().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let (_dir, store) = test_store();

        let first = store
            .put(1, StatePayload::Structured(json!({"cols": 4})))
            .unwrap();
        let second = store
            .put(1, StatePayload::Structured(json!({"cols": 8})))
            .unwrap();

        let stored = store.get(1).unwrap().unwrap();
        assert_eq!(stored.content, r#"{"cols":8}"#);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn test_raw_text_is_stored_verbatim() {
        let (_dir, store) = test_store();

        store
            .put(1, StatePayload::RawJsonText("{ \"rows\" : 2 }".to_string()))
            .unwrap();

        assert_eq!(store.get(1).unwrap().unwrap().content, "{ \"rows\" : 2 }");
    }

    #[test]
    fn test_blobs_are_per_user() {
        let (_dir, store) = test_store();

        store
            .put(1, StatePayload::Structured(json!({"owner": 1})))
            .unwrap();
        store
            .put(2, StatePayload::Structured(json!({"owner": 2})))
            .unwrap();

        assert_eq!(store.get(1).unwrap().unwrap().content, r#"{"owner":1}"#);
        assert_eq!(store.get(2).unwrap().unwrap().content, r#"{"owner":2}"#);
    }
}
