use serde::{Deserialize, Serialize};

use crate::constants::{MIN_PASSWORD_CHARS, MIN_USERNAME_CHARS};

/// User record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// When the user was created (Unix microseconds)
    pub created_at: i64,
}

/// Signup and login form fields
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl UserRecord {
    /// Check signup requirements on an already trimmed username
    pub fn validate_signup(username: &str, password: &str) -> bool {
        username.chars().count() >= MIN_USERNAME_CHARS
            && password.chars().count() >= MIN_PASSWORD_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_signup() {
        assert!(UserRecord::validate_signup("bob", "secret"));
        assert!(UserRecord::validate_signup("alice", "password123"));

        // Username too short
        assert!(!UserRecord::validate_signup("al", "password123"));

        // Password too short
        assert!(!UserRecord::validate_signup("alice", "12345"));

        // Counted in characters, not bytes
        assert!(!UserRecord::validate_signup("éé", "password123"));
    }

    #[test]
    fn test_user_record_serialization() {
        let record = UserRecord {
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: 1_733_788_800_000_000,
        };

        let bytes = bincode::serialize(&record).unwrap();
        let deserialized: UserRecord = bincode::deserialize(&bytes).unwrap();

        assert_eq!(record.username, deserialized.username);
        assert_eq!(record.password_hash, deserialized.password_hash);
        assert_eq!(record.created_at, deserialized.created_at);
    }
}
