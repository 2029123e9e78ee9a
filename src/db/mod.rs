pub mod tables;

use redb::{Database, Error as RedbError, ReadableTable, StorageError, Table};
use std::path::Path;
use std::sync::Arc;

/// Database handle type (Arc-wrapped for sharing across handlers)
pub type Db = Arc<Database>;

/// Open or create the redb database at the given path
///
/// Creates all required tables up front, so request handlers can open
/// them from read transactions without checking for first use.
#[allow(clippy::result_large_err)]
pub fn open_database(path: impl AsRef<Path>) -> Result<Db, RedbError> {
    tracing::info!("Opening database at: {:?}", path.as_ref());

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                RedbError::Io(e)
            })?;
        }
    }

    let db = Database::create(path)?;
    init_tables(&db)?;

    tracing::info!("Database initialized successfully");

    Ok(Arc::new(db))
}

/// Create every table the server uses. Safe to run against an existing file.
#[allow(clippy::result_large_err)]
pub fn init_tables(db: &Database) -> Result<(), RedbError> {
    let write_txn = db.begin_write()?;
    {
        let _ = write_txn.open_table(tables::USERS)?;
        let _ = write_txn.open_table(tables::USERNAMES)?;
        let _ = write_txn.open_table(tables::USER_STATES)?;
        let _ = write_txn.open_table(tables::DESIGNS)?;
        let _ = write_txn.open_table(tables::SEQUENCES)?;
    }
    write_txn.commit()?;
    Ok(())
}

/// Issue the next id from a named sequence
///
/// Ids start at 1 and are never handed out twice, even after the row
/// holding them is deleted.
pub fn next_id(
    sequences: &mut Table<'_, &'static str, u64>,
    sequence: &str,
) -> Result<u64, StorageError> {
    let last = sequences
        .get(sequence)?
        .map(|guard| guard.value())
        .unwrap_or(0);
    let next = last + 1;
    sequences.insert(sequence, next)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_database_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("changeable.db");

        open_database(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_next_id_is_monotonic_per_sequence() {
        let temp_dir = TempDir::new().unwrap();
        let db = open_database(temp_dir.path().join("test.db")).unwrap();

        let write_txn = db.begin_write().unwrap();
        {
            let mut sequences = write_txn.open_table(tables::SEQUENCES).unwrap();
            assert_eq!(next_id(&mut sequences, "a").unwrap(), 1);
            assert_eq!(next_id(&mut sequences, "a").unwrap(), 2);
            assert_eq!(next_id(&mut sequences, "b").unwrap(), 1);
        }
        write_txn.commit().unwrap();

        let write_txn = db.begin_write().unwrap();
        {
            let mut sequences = write_txn.open_table(tables::SEQUENCES).unwrap();
            assert_eq!(next_id(&mut sequences, "a").unwrap(), 3);
        }
        write_txn.commit().unwrap();
    }
}
