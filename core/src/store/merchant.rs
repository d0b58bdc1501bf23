use super::{ts, SimStore};
use crate::{error::SimResult, merchant_subsystem::MerchantRecord};
use rusqlite::params;

impl SimStore {
    // ── Merchants ─────────────────────────────────────────────────

    /// Insert the roster in one SQL transaction. Returns rows written.
    pub fn insert_merchants(&self, run_id: &str, merchants: &[MerchantRecord]) -> SimResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO merchants (
                    run_id, merchant_id, signup_timestamp, country,
                    industry, business_type, signup_channel
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for m in merchants {
                stmt.execute(params![
                    run_id,
                    &m.merchant_id,
                    ts(&m.signup_timestamp),
                    &m.country,
                    m.industry.as_str(),
                    m.business_type.as_str(),
                    m.signup_channel.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(merchants.len())
    }

    pub fn merchant_count(&self, run_id: &str) -> SimResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM merchants WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Merchant ids in signup order, ties broken by id.
    pub fn merchant_ids_by_signup(&self, run_id: &str) -> SimResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT merchant_id FROM merchants WHERE run_id = ?1
             ORDER BY signup_timestamp ASC, merchant_id ASC",
        )?;
        let ids = stmt
            .query_map(params![run_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}
