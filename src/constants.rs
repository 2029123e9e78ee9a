/// Maximum request body size in bytes (5MB)
pub const MAX_PAYLOAD_BYTES: usize = 5_242_880;

/// Warning threshold for large state blobs (1MB)
/// Log when autosaves exceed this size for monitoring
pub const WARN_STATE_SIZE_BYTES: usize = 1_048_576;

/// Stored design names are cut to this many characters
pub const MAX_DESIGN_NAME_CHARS: usize = 120;

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Design field that is cosmetic and never part of a design's identity
pub const COSMETIC_KEY: &str = "ruleColors";

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "changeable_session";

/// Secret used when running in development without CHANGEABLE_SECRET
pub const DEV_SECRET_KEY: &str = "dev-changeable-secret";

pub const PROJECT_NAME: &str = "Changeable";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_NAME_REQUIRED: &str = "Name required";

pub const ERR_STATE_REQUIRED: &str = "State required";

pub const ERR_NAME_EXISTS: &str = "Name already exists";

pub const ERR_DESIGN_EXISTS: &str = "Design already exists";

pub const ERR_INVALID_JSON: &str = "Invalid JSON";

/// Request body parsed as JSON but did not have the expected shape
pub const ERR_INVALID_BODY: &str = "Invalid request body";

pub const ERR_SIGNUP_REQUIREMENTS: &str = "Username must be 3+ chars and password 6+ chars.";
