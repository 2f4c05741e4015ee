//! LMDB environment and database handles.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use lattice_store::{StoreConfig, StoreError, STORE_VERSION_CURRENT, STORE_VERSION_MINIMUM};

use crate::transaction::{LmdbReadTransaction, LmdbWriteTransaction};
use crate::LmdbError;

const NUM_DATABASES: u32 = 13;

/// The LMDB-backed implementation of `lattice_store::Store`. One environment
/// holds all tables; each table is its own named LMDB database within it.
pub struct LmdbStore {
    pub(crate) env: Env,
    pub(crate) accounts: Database<Bytes, Bytes>,
    pub(crate) blocks: Database<Bytes, Bytes>,
    pub(crate) pending: Database<Bytes, Bytes>,
    pub(crate) frontiers: Database<Bytes, Bytes>,
    pub(crate) representation: Database<Bytes, Bytes>,
    pub(crate) confirmation_height: Database<Bytes, Bytes>,
    pub(crate) pruned: Database<Bytes, Bytes>,
    pub(crate) unchecked: Database<Bytes, Bytes>,
    pub(crate) online_weight: Database<Bytes, Bytes>,
    pub(crate) peers: Database<Bytes, Bytes>,
    pub(crate) final_votes: Database<Bytes, Bytes>,
    pub(crate) meta: Database<Bytes, Bytes>,
}

impl LmdbStore {
    /// Open (creating if absent) an LMDB environment at `path`, then verify
    /// or stamp the schema version.
    pub fn open(path: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(path).map_err(|e| StoreError::Backend(e.to_string()))?;

        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(NUM_DATABASES)
                .max_readers(config.max_readers)
                .map_size(config.max_map_size_mb as usize * 1024 * 1024)
                .open(path)
        }
        .map_err(LmdbError::from)?;

        let mut wtxn = env.write_txn().map_err(LmdbError::from)?;
        let accounts = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("accounts")).map_err(LmdbError::from)?;
        let blocks = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("blocks")).map_err(LmdbError::from)?;
        let pending = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("pending")).map_err(LmdbError::from)?;
        let frontiers = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("frontiers")).map_err(LmdbError::from)?;
        let representation = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("representation"))
            .map_err(LmdbError::from)?;
        let confirmation_height = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("confirmation_height"))
            .map_err(LmdbError::from)?;
        let pruned = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("pruned")).map_err(LmdbError::from)?;
        let unchecked = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("unchecked")).map_err(LmdbError::from)?;
        let online_weight = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("online_weight"))
            .map_err(LmdbError::from)?;
        let peers = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("peers")).map_err(LmdbError::from)?;
        let final_votes = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("final_votes")).map_err(LmdbError::from)?;
        let meta = env.create_database::<Bytes, Bytes>(&mut wtxn, Some("meta")).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;

        let store = Self {
            env,
            accounts,
            blocks,
            pending,
            frontiers,
            representation,
            confirmation_height,
            pruned,
            unchecked,
            online_weight,
            peers,
            final_votes,
            meta,
        };

        store.check_version()?;
        Ok(store)
    }

    fn check_version(&self) -> Result<(), StoreError> {
        use lattice_store::VersionStore;
        let mut wtxn = self.begin_write_concrete()?;
        let found = VersionStore::get(self, &wtxn)?;
        match found {
            None => {
                tracing::info!(version = STORE_VERSION_CURRENT, "initializing fresh store");
                VersionStore::put(self, &mut wtxn, STORE_VERSION_CURRENT)?;
                wtxn.commit().map_err(LmdbError::from)?;
                Ok(())
            }
            Some(v) if (STORE_VERSION_MINIMUM..=STORE_VERSION_CURRENT).contains(&v) => {
                if v < STORE_VERSION_CURRENT {
                    tracing::warn!(from = v, to = STORE_VERSION_CURRENT, "store schema upgrade path not yet needed in practice, accepting");
                    VersionStore::put(self, &mut wtxn, STORE_VERSION_CURRENT)?;
                    wtxn.commit().map_err(LmdbError::from)?;
                }
                Ok(())
            }
            Some(v) => Err(StoreError::UnsupportedVersion {
                found: v,
                minimum: STORE_VERSION_MINIMUM,
                current: STORE_VERSION_CURRENT,
            }),
        }
    }

    pub(crate) fn begin_read_concrete(&self) -> Result<LmdbReadTransaction, StoreError> {
        LmdbReadTransaction::new(self.env.clone()).map_err(|e| LmdbError::from(e).into())
    }

    pub(crate) fn begin_write_concrete(&self) -> Result<LmdbWriteTransaction, StoreError> {
        LmdbWriteTransaction::new(self.env.clone()).map_err(|e| LmdbError::from(e).into())
    }

    /// Run the integrity scan over every table, for startup diagnostics.
    pub fn check_integrity(&self) -> Result<crate::IntegrityReport, LmdbError> {
        crate::integrity::check_integrity(&self.env)
    }
}

impl lattice_store::Store for LmdbStore {
    fn begin_read(&self) -> Box<dyn lattice_store::ReadTransaction + '_> {
        Box::new(self.begin_read_concrete().expect("failed to open LMDB read transaction"))
    }

    fn begin_write(&self) -> Box<dyn lattice_store::WriteTransaction + '_> {
        Box::new(self.begin_write_concrete().expect("failed to open LMDB write transaction"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_store::{AccountInfo, AccountStore, Store};
    use lattice_types::{Account, Amount, BlockHash, Epoch, Timestamp};

    fn open_temp() -> (tempfile::TempDir, LmdbStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LmdbStore::open(dir.path(), &StoreConfig::default()).unwrap();
        (dir, store)
    }

    #[test]
    fn fresh_store_stamps_current_version() {
        let (_dir, store) = open_temp();
        let rtxn = store.begin_read();
        assert_eq!(lattice_store::VersionStore::get(&store, &*rtxn).unwrap(), Some(STORE_VERSION_CURRENT));
    }

    #[test]
    fn reopening_an_existing_store_keeps_its_data() {
        let dir = tempfile::tempdir().unwrap();
        let account = Account::new([3u8; 32]);
        let info = AccountInfo {
            head: BlockHash::from([1u8; 32]),
            representative: Account::new([2u8; 32]),
            balance: Amount::new(500),
            modified: Timestamp::new(1_700_000_000),
            block_count: 1,
            epoch: Epoch::Epoch2,
        };
        {
            let store = LmdbStore::open(dir.path(), &StoreConfig::default()).unwrap();
            let mut wtxn = store.begin_write();
            AccountStore::put(&store, &mut *wtxn, &account, &info).unwrap();
            wtxn.commit().unwrap();
        }
        let store = LmdbStore::open(dir.path(), &StoreConfig::default()).unwrap();
        let rtxn = store.begin_read();
        assert_eq!(AccountStore::get(&store, &*rtxn, &account).unwrap(), Some(info));
    }

    #[test]
    fn integrity_scan_counts_known_tables() {
        let (_dir, store) = open_temp();
        let report = store.check_integrity().unwrap();
        assert!(report.is_healthy());
        assert!(report.databases_checked > 0);
    }
}
