use redb::TableDefinition;

/// Users table: user_id -> UserRecord (serialized)
pub const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Username index: username -> user_id
/// Enforces username uniqueness at the store level
pub const USERNAMES: TableDefinition<&str, u64> = TableDefinition::new("usernames");

/// State blobs table: user_id -> StateRecord (serialized)
/// At most one autosave per user, overwritten on every save
pub const USER_STATES: TableDefinition<u64, &[u8]> = TableDefinition::new("user_states");

/// Designs table: design_id -> DesignRecord (serialized)
pub const DESIGNS: TableDefinition<u64, &[u8]> = TableDefinition::new("designs");

/// Id counters: sequence name -> last issued id
pub const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

pub const USER_SEQUENCE: &str = "users";
pub const DESIGN_SEQUENCE: &str = "designs";
