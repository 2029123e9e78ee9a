//! Access and uniqueness rules for designs
//!
//! Written against the repository traits; the transaction boundary belongs
//! to the caller.

use crate::constants::{
    ERR_DESIGN_EXISTS, ERR_NAME_EXISTS, ERR_NAME_REQUIRED, ERR_STATE_REQUIRED,
    MAX_DESIGN_NAME_CHARS,
};
use crate::error::{AppError, Result};
use crate::models::{Design, DesignDraft, DesignId, DesignRecord, ListScope, UserId};
use crate::normalize::{signature, text_signature};
use crate::registry::repository::{DesignReader, DesignRepository, Scope};

/// List designs for the caller, newest first
pub fn list<R: DesignReader>(
    repo: &R,
    caller: UserId,
    scope: ListScope,
    private_only: bool,
) -> Result<Vec<Design>> {
    let scope = match scope {
        ListScope::Public => Scope::Public,
        ListScope::Private if private_only => Scope::PrivateOwnedBy(caller),
        ListScope::Private => Scope::OwnedBy(caller),
    };
    repo.find_by_scope(scope)
}

/// Store a new design owned by the caller
///
/// Checks run in a fixed order and the first failure is reported: name
/// present, state present, name unused in the caller's visibility scope,
/// content unused in the same scope.
pub fn create<R: DesignRepository>(
    repo: &mut R,
    caller: UserId,
    draft: DesignDraft,
    now: i64,
) -> Result<DesignId> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(ERR_NAME_REQUIRED.to_string()));
    }

    let content = draft
        .content
        .ok_or_else(|| AppError::Validation(ERR_STATE_REQUIRED.to_string()))?;

    // Uniqueness holds for the name as stored, after truncation
    let stored_name: String = name.chars().take(MAX_DESIGN_NAME_CHARS).collect();

    let visible = repo.find_by_scope(Scope::VisibleTo(caller))?;

    if visible.iter().any(|design| design.name == stored_name) {
        tracing::debug!("User {} reused design name {:?}", caller, stored_name);
        return Err(AppError::Duplicate(ERR_NAME_EXISTS.to_string()));
    }

    // Content that cannot be parsed has no signature and never collides
    if let Some(incoming) = signature(&content) {
        let duplicate = visible
            .iter()
            .find(|design| text_signature(&design.content).as_deref() == Some(incoming.as_str()));
        if let Some(existing) = duplicate {
            tracing::debug!(
                "User {} resubmitted the content of design {}",
                caller,
                existing.id
            );
            return Err(AppError::Duplicate(ERR_DESIGN_EXISTS.to_string()));
        }
    }

    let record = DesignRecord {
        owner: caller,
        name: stored_name,
        is_public: draft.is_public,
        content: content.to_design_text(),
        created_at: now,
    };
    repo.insert(record)
}

/// Fetch one design, enforcing visibility
pub fn detail<R: DesignReader>(repo: &R, caller: UserId, id: DesignId) -> Result<Design> {
    let design = repo.find_by_id(id)?.ok_or(AppError::NotFound)?;

    if !design.is_readable_by(caller) {
        tracing::warn!("User {} denied read of private design {}", caller, id);
        return Err(AppError::Forbidden);
    }

    Ok(design)
}

/// Delete a design; only its owner may, whatever its visibility
pub fn remove<R: DesignRepository>(repo: &mut R, caller: UserId, id: DesignId) -> Result<()> {
    let design = repo.find_by_id(id)?.ok_or(AppError::NotFound)?;

    if design.owner != caller {
        tracing::warn!(
            "User {} denied delete of design {} owned by {}",
            caller,
            id,
            design.owner
        );
        return Err(AppError::Forbidden);
    }

    if !repo.delete(id)? {
        return Err(AppError::NotFound);
    }
    Ok(())
}
