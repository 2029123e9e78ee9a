//! redb-backed design repository
//!
//! Both types wrap tables opened from a transaction the caller owns, so the
//! caller decides when work is committed.

use redb::{ReadableTable, Table, WriteTransaction};

use crate::db::{next_id, tables};
use crate::error::Result;
use crate::models::{Design, DesignId, DesignRecord};
use crate::registry::repository::{sort_newest_first, DesignReader, DesignRepository, Scope};

/// Read-only view over the designs table of a read or write transaction
pub struct DesignStore<T> {
    designs: T,
}

impl<T> DesignStore<T> {
    pub fn new(designs: T) -> Self {
        Self { designs }
    }
}

impl<T> DesignReader for DesignStore<T>
where
    T: ReadableTable<u64, &'static [u8]>,
{
    fn find_by_id(&self, id: DesignId) -> Result<Option<Design>> {
        let record = self
            .designs
            .get(id)?
            .map(|bytes| bincode::deserialize::<DesignRecord>(bytes.value()))
            .transpose()?;
        Ok(record.map(|r| Design::from_record(id, r)))
    }

    fn find_by_scope(&self, scope: Scope) -> Result<Vec<Design>> {
        let mut found = Vec::new();
        for entry in self.designs.iter()? {
            let (id, bytes) = entry?;
            let record: DesignRecord = bincode::deserialize(bytes.value())?;
            if scope.contains(record.owner, record.is_public) {
                found.push(Design::from_record(id.value(), record));
            }
        }

        sort_newest_first(&mut found);
        tracing::debug!("{} designs in scope {:?}", found.len(), scope);
        Ok(found)
    }
}

/// Repository over a write transaction
pub struct DesignWriter<'txn> {
    store: DesignStore<Table<'txn, u64, &'static [u8]>>,
    sequences: Table<'txn, &'static str, u64>,
}

impl<'txn> DesignWriter<'txn> {
    pub fn open(write_txn: &'txn WriteTransaction) -> Result<Self> {
        Ok(Self {
            store: DesignStore::new(write_txn.open_table(tables::DESIGNS)?),
            sequences: write_txn.open_table(tables::SEQUENCES)?,
        })
    }
}

impl DesignReader for DesignWriter<'_> {
    fn find_by_id(&self, id: DesignId) -> Result<Option<Design>> {
        self.store.find_by_id(id)
    }

    fn find_by_scope(&self, scope: Scope) -> Result<Vec<Design>> {
        self.store.find_by_scope(scope)
    }
}

impl DesignRepository for DesignWriter<'_> {
    fn insert(&mut self, record: DesignRecord) -> Result<DesignId> {
        let id = next_id(&mut self.sequences, tables::DESIGN_SEQUENCE)?;
        let bytes = bincode::serialize(&record)?;
        self.store.designs.insert(id, bytes.as_slice())?;
        Ok(id)
    }

    fn delete(&mut self, id: DesignId) -> Result<bool> {
        let removed = self.store.designs.remove(id)?.is_some();
        Ok(removed)
    }
}
