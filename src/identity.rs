//! User accounts and credential checks
//!
//! Usernames are unique through the `usernames` index table, written in the
//! same transaction as the user row.

use redb::ReadableTable;

use crate::constants::ERR_SIGNUP_REQUIREMENTS;
use crate::db::{next_id, tables, Db};
use crate::error::{AppError, Result};
use crate::models::{now_micros, UserId, UserRecord};
use crate::security::{hash_password, verify_password};

pub struct IdentityStore {
    db: Db,
}

impl IdentityStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create an account and return its id
    ///
    /// The username is trimmed before validation and storage.
    pub fn signup(&self, username: &str, password: &str) -> Result<UserId> {
        let username = username.trim();
        if !UserRecord::validate_signup(username, password) {
            return Err(AppError::Validation(ERR_SIGNUP_REQUIREMENTS.to_string()));
        }

        let password_hash = hash_password(password)?;

        let write_txn = self.db.begin_write()?;
        let user_id = {
            let mut usernames = write_txn.open_table(tables::USERNAMES)?;
            if usernames.get(username)?.is_some() {
                tracing::info!("Signup rejected, username taken: {}", username);
                return Err(AppError::DuplicateUsername);
            }

            let mut sequences = write_txn.open_table(tables::SEQUENCES)?;
            let user_id = next_id(&mut sequences, tables::USER_SEQUENCE)?;

            let record = UserRecord {
                username: username.to_string(),
                password_hash,
                created_at: now_micros(),
            };
            let bytes = bincode::serialize(&record)?;

            let mut users = write_txn.open_table(tables::USERS)?;
            users.insert(user_id, bytes.as_slice())?;
            usernames.insert(username, user_id)?;

            user_id
        };
        write_txn.commit()?;

        tracing::info!("New user registered: {} (id {})", username, user_id);
        Ok(user_id)
    }

    /// Verify a username and password pair
    ///
    /// Unknown usernames and wrong passwords fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserId> {
        let username = username.trim();

        let found = {
            let read_txn = self.db.begin_read()?;
            let usernames = read_txn.open_table(tables::USERNAMES)?;
            let users = read_txn.open_table(tables::USERS)?;

            let user_id = usernames.get(username)?.map(|guard| guard.value());
            let record = match user_id {
                Some(id) => users
                    .get(id)?
                    .map(|bytes| bincode::deserialize::<UserRecord>(bytes.value()))
                    .transpose()?,
                None => None,
            };
            user_id.zip(record)
        };

        match found {
            Some((user_id, record)) if verify_password(&record.password_hash, password) => {
                Ok(user_id)
            }
            _ => {
                tracing::warn!("Failed login attempt for username: {}", username);
                Err(AppError::InvalidCredentials)
            }
        }
    }

    pub fn exists(&self, user_id: UserId) -> Result<bool> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(tables::USERS)?;
        let exists = users.get(user_id)?.is_some();
        Ok(exists)
    }

    pub fn username(&self, user_id: UserId) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(tables::USERS)?;
        let record = users
            .get(user_id)?
            .map(|bytes| bincode::deserialize::<UserRecord>(bytes.value()))
            .transpose()?;
        Ok(record.map(|r| r.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, IdentityStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = open_database(temp_dir.path().join("test.db")).unwrap();
        (temp_dir, IdentityStore::new(db))
    }

    #[test]
    fn test_signup_then_authenticate() {
        let (_dir, store) = test_store();

        let user_id = store.signup("alice", "password123").unwrap();

        assert_eq!(store.authenticate("alice", "password123").unwrap(), user_id);
        assert!(store.exists(user_id).unwrap());
        assert_eq!(store.username(user_id).unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn test_signup_trims_username() {
        let (_dir, store) = test_store();

        let user_id = store.signup("  alice  ", "password123").unwrap();

        assert_eq!(store.username(user_id).unwrap().as_deref(), Some("alice"));
        assert_eq!(store.authenticate("alice ", "password123").unwrap(), user_id);
    }

    #[test]
    fn test_signup_requirements() {
        let (_dir, store) = test_store();

        let attempts = [
            ("al", "password123"),
            ("alice", "short"),
            ("   ", "password123"),
        ];

        for (username, password) in attempts {
            match store.signup(username, password) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, ERR_SIGNUP_REQUIREMENTS),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_duplicate_username() {
        let (_dir, store) = test_store();

        store.signup("alice", "password123").unwrap();

        assert!(matches!(
            store.signup("alice", "different-password"),
            Err(AppError::DuplicateUsername)
        ));
    }

    #[test]
    fn test_user_ids_are_distinct() {
        let (_dir, store) = test_store();

        let first = store.signup("alice", "password123").unwrap();
        let second = store.signup("bob", "password123").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_authenticate_failures() {
        let (_dir, store) = test_store();
        store.signup("alice", "password123").unwrap();

        assert!(matches!(
            store.authenticate("alice", "wrong-password"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("nobody", "password123"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unknown_user() {
        let (_dir, store) = test_store();

        assert!(!store.exists(42).unwrap());
        assert!(store.username(42).unwrap().is_none());
    }
}
