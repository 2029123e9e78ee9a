use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::ERR_INVALID_BODY;
use crate::error::{AppError, Result};
use crate::models::{timestamp_to_rfc3339, DesignId, StatePayload, UserId};

/// Design record stored in redb
///
/// Never mutated after creation; only inserted and removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRecord {
    pub owner: UserId,
    pub name: String,
    pub is_public: bool,
    /// Canonical JSON text of the submitted state, `ruleColors` included
    pub content: String,
    /// Unix microseconds
    pub created_at: i64,
}

/// A stored design together with its id
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub id: DesignId,
    pub owner: UserId,
    pub name: String,
    pub is_public: bool,
    pub content: String,
    pub created_at: i64,
}

impl Design {
    pub fn from_record(id: DesignId, record: DesignRecord) -> Self {
        Self {
            id,
            owner: record.owner,
            name: record.name,
            is_public: record.is_public,
            content: record.content,
            created_at: record.created_at,
        }
    }

    /// Private designs are readable by their owner only
    pub fn is_readable_by(&self, user: UserId) -> bool {
        self.is_public || self.owner == user
    }
}

/// Validated input for creating a design
#[derive(Debug, Clone)]
pub struct DesignDraft {
    pub name: String,
    pub is_public: bool,
    pub content: Option<StatePayload>,
}

/// JSON body of POST /api/designs
#[derive(Debug, Deserialize)]
pub struct CreateDesignRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub state: Option<Value>,
}

impl CreateDesignRequest {
    /// Parse a raw request body
    ///
    /// Bodies that are not JSON (or are JSON `null`) are malformed; JSON of
    /// the wrong shape is a validation error.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| AppError::MalformedPayload)?;
        if value.is_null() {
            return Err(AppError::MalformedPayload);
        }

        serde_json::from_value(value).map_err(|e| {
            tracing::debug!("Rejected design body: {}", e);
            AppError::Validation(ERR_INVALID_BODY.to_string())
        })
    }

    pub fn into_draft(self) -> DesignDraft {
        DesignDraft {
            name: self.name.unwrap_or_default(),
            is_public: self.is_public.unwrap_or(false),
            content: self.state.map(StatePayload::from_value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Designs owned by the caller
    Private,
    /// Every public design
    Public,
}

/// Query parameters of GET /api/designs
#[derive(Debug, Default, Deserialize)]
pub struct ListDesignsParams {
    pub scope: Option<String>,
    pub include_state: Option<String>,
    pub private_only: Option<String>,
}

impl ListDesignsParams {
    /// Anything other than `public` lists the caller's own designs
    pub fn scope(&self) -> ListScope {
        match self.scope.as_deref() {
            Some("public") => ListScope::Public,
            _ => ListScope::Private,
        }
    }

    pub fn include_state(&self) -> bool {
        self.include_state.as_deref() == Some("1")
    }

    pub fn private_only(&self) -> bool {
        self.private_only.as_deref() == Some("1")
    }
}

/// Design as returned by the API
#[derive(Debug, Serialize)]
pub struct DesignView {
    pub id: DesignId,
    pub name: String,
    pub is_public: bool,
    pub user_id: UserId,
    pub created_at: String,
    pub state: Option<Value>,
}

impl DesignView {
    pub fn from_design(design: Design, include_state: bool) -> Result<Self> {
        let state = if include_state {
            Some(serde_json::from_str(&design.content)?)
        } else {
            None
        };

        Ok(Self {
            id: design.id,
            name: design.name,
            is_public: design.is_public,
            user_id: design.owner,
            created_at: timestamp_to_rfc3339(design.created_at),
            state,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DesignListResponse {
    pub designs: Vec<DesignView>,
}

#[derive(Debug, Serialize)]
pub struct CreateDesignResponse {
    pub ok: bool,
    pub id: DesignId,
}
