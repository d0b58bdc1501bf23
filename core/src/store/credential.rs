use super::{ts, SimStore};
use crate::{credential_subsystem::ApiKeyRecord, error::SimResult, types::Environment};
use rusqlite::params;

impl SimStore {
    // ── API keys ──────────────────────────────────────────────────

    pub fn insert_api_keys(&self, run_id: &str, keys: &[ApiKeyRecord]) -> SimResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO api_keys (
                    run_id, api_key_id, merchant_id, created_timestamp, environment, key_type
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for k in keys {
                stmt.execute(params![
                    run_id,
                    &k.api_key_id,
                    &k.merchant_id,
                    ts(&k.created_timestamp),
                    k.environment.as_str(),
                    &k.key_type,
                ])?;
            }
        }
        tx.commit()?;
        Ok(keys.len())
    }

    pub fn api_key_count(&self, run_id: &str, environment: Option<Environment>) -> SimResult<i64> {
        let count = match environment {
            Some(env) => self.conn.query_row(
                "SELECT COUNT(*) FROM api_keys WHERE run_id = ?1 AND environment = ?2",
                params![run_id, env.as_str()],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                "SELECT COUNT(*) FROM api_keys WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )?,
        };
        Ok(count)
    }

    /// LIVE keys whose merchant has no TEST key created strictly earlier.
    /// Always zero for generated data.
    pub fn orphan_live_key_count(&self, run_id: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM api_keys l
             WHERE l.run_id = ?1 AND l.environment = 'LIVE'
               AND NOT EXISTS (
                   SELECT 1 FROM api_keys t
                   WHERE t.run_id = l.run_id AND t.merchant_id = l.merchant_id
                     AND t.environment = 'TEST'
                     AND t.created_timestamp < l.created_timestamp
               )",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
