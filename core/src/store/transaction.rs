use super::{ts, SimStore, TXN_BATCH_SIZE};
use crate::{activity_subsystem::TransactionRecord, error::SimResult, types::Environment};
use rusqlite::params;

impl SimStore {
    // ── Transactions ──────────────────────────────────────────────

    /// Insert transactions, committing every TXN_BATCH_SIZE rows.
    pub fn insert_transactions(&self, run_id: &str, txns: &[TransactionRecord]) -> SimResult<usize> {
        for (batch_no, batch) in txns.chunks(TXN_BATCH_SIZE).enumerate() {
            let tx = self.conn.unchecked_transaction()?;
            {
                let mut stmt = tx.prepare_cached(
                    "INSERT INTO transactions (
                        run_id, transaction_id, merchant_id, transaction_timestamp,
                        environment, status, amount, currency, payment_method, failure_reason
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                )?;
                for t in batch {
                    stmt.execute(params![
                        run_id,
                        &t.transaction_id,
                        &t.merchant_id,
                        ts(&t.transaction_timestamp),
                        t.environment.as_str(),
                        t.status.as_str(),
                        t.amount as i64,
                        &t.currency,
                        t.payment_method.as_str(),
                        t.failure_reason.map(|r| r.as_str()),
                    ])?;
                }
            }
            tx.commit()?;
            log::debug!("run={run_id} store: committed transaction batch {batch_no} ({} rows)", batch.len());
        }
        Ok(txns.len())
    }

    pub fn transaction_count(&self, run_id: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn txn_count_by_environment(&self, run_id: &str, environment: Environment) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE run_id = ?1 AND environment = ?2",
            params![run_id, environment.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Sum of successful LIVE amounts.
    pub fn live_volume(&self, run_id: &str) -> SimResult<i64> {
        let volume = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions
             WHERE run_id = ?1 AND environment = 'LIVE' AND status = 'SUCCESS'",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(volume)
    }

    /// Rows where status and failure_reason disagree. Always zero for
    /// generated data.
    pub fn inconsistent_failure_count(&self, run_id: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM transactions
             WHERE run_id = ?1 AND (
                 (status = 'FAILED' AND failure_reason IS NULL)
                 OR (status = 'SUCCESS' AND failure_reason IS NOT NULL)
             )",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
