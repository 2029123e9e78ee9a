//! Design registry
//!
//! Designs are unique by name and by content signature within the creator's
//! visibility scope (all public designs plus the creator's private ones).
//! Every create runs its checks and its insert inside one redb write
//! transaction. redb admits one writer at a time, so concurrent creates of the
//! same name or content cannot both pass the checks.

pub mod repository;
pub mod rules;
pub mod store;

pub use repository::{DesignReader, DesignRepository, Scope};
pub use store::{DesignStore, DesignWriter};

use crate::db::{tables, Db};
use crate::error::Result;
use crate::models::{now_micros, Design, DesignDraft, DesignId, ListScope, UserId};

pub struct DesignRegistry {
    db: Db,
}

impl DesignRegistry {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn list(&self, caller: UserId, scope: ListScope, private_only: bool) -> Result<Vec<Design>> {
        let read_txn = self.db.begin_read()?;
        let repo = DesignStore::new(read_txn.open_table(tables::DESIGNS)?);
        let designs = rules::list(&repo, caller, scope, private_only)?;
        Ok(designs)
    }

    pub fn create(&self, caller: UserId, draft: DesignDraft) -> Result<DesignId> {
        let write_txn = self.db.begin_write()?;
        let id = {
            let mut repo = DesignWriter::open(&write_txn)?;
            rules::create(&mut repo, caller, draft, now_micros())?
        };
        write_txn.commit()?;

        tracing::info!("Design {} created by user {}", id, caller);
        Ok(id)
    }

    pub fn detail(&self, caller: UserId, id: DesignId) -> Result<Design> {
        let read_txn = self.db.begin_read()?;
        let repo = DesignStore::new(read_txn.open_table(tables::DESIGNS)?);
        let design = rules::detail(&repo, caller, id)?;
        Ok(design)
    }

    pub fn delete(&self, caller: UserId, id: DesignId) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut repo = DesignWriter::open(&write_txn)?;
            rules::remove(&mut repo, caller, id)?;
        }
        write_txn.commit()?;

        tracing::info!("Design {} deleted by user {}", id, caller);
        Ok(())
    }
}
