pub mod design;
pub mod state;
pub mod user;

pub use design::{
    CreateDesignRequest, CreateDesignResponse, Design, DesignDraft, DesignListResponse,
    DesignRecord, DesignView, ListDesignsParams, ListScope,
};
pub use state::{StatePayload, StateRecord, StateResponse};
pub use user::{Credentials, UserRecord};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Users are identified by a sequence-issued integer
pub type UserId = u64;

/// Designs are identified by a sequence-issued integer
pub type DesignId = u64;

/// Body of successful mutations that return nothing else
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Current time as Unix microseconds, the resolution records are stored at
pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

/// Convert Unix microseconds to an RFC 3339 string, defaulting to now if invalid
pub fn timestamp_to_rfc3339(micros: i64) -> String {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos)
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_rfc3339() {
        assert_eq!(
            timestamp_to_rfc3339(1_733_788_800_123_456),
            "2024-12-10T00:00:00.123456Z"
        );
        assert_eq!(timestamp_to_rfc3339(0), "1970-01-01T00:00:00.000000Z");
    }
}
