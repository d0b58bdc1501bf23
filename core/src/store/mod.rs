//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The generator never touches SQL; the store consumes a finished
//! Dataset and writes it in one pass.

use crate::{config::GeneratorConfig, dataset::Dataset, error::{SimError, SimResult}, types::Timestamp};
mod credential;
mod merchant;
mod transaction;
use rusqlite::{params, Connection, OptionalExtension};

/// Transactions are committed in batches of this many rows.
pub const TXN_BATCH_SIZE: usize = 1000;

/// Canonical text form of a timestamp column.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn ts(t: &Timestamp) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_dataset.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(
        &self,
        run_id: &str,
        seed: u64,
        version: &str,
        config: &GeneratorConfig,
    ) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, seed, version, config_json) VALUES (?1, ?2, ?3, ?4)",
            params![run_id, seed as i64, version, serde_json::to_string(config)?],
        )?;
        Ok(())
    }

    pub fn run_seed(&self, run_id: &str) -> SimResult<u64> {
        let seed: Option<i64> = self
            .conn
            .query_row(
                "SELECT seed FROM run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        seed.map(|s| s as u64).ok_or_else(|| SimError::RunNotFound {
            run_id: run_id.to_string(),
        })
    }

    pub fn run_config(&self, run_id: &str) -> SimResult<GeneratorConfig> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT config_json FROM run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        let json = json.ok_or_else(|| SimError::RunNotFound {
            run_id: run_id.to_string(),
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    // ── Dataset ────────────────────────────────────────────────

    /// Persist all three tables of a dataset whose run row already exists.
    /// Merchants land first so key and transaction foreign keys resolve.
    pub fn save_dataset(&self, dataset: &Dataset) -> SimResult<()> {
        self.run_seed(&dataset.run_id)?;

        let merchants = self.insert_merchants(&dataset.run_id, &dataset.merchants)?;
        let keys = self.insert_api_keys(&dataset.run_id, &dataset.api_keys)?;
        let txns = self.insert_transactions(&dataset.run_id, &dataset.transactions)?;

        log::info!(
            "run={} store: inserted {merchants} merchants, {keys} api keys, {txns} transactions",
            dataset.run_id
        );
        Ok(())
    }
}
