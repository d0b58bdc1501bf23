//! CSV materialization of a dataset: one file per table, header row first.

use crate::{
    activity_subsystem::TransactionRecord, credential_subsystem::ApiKeyRecord, dataset::Dataset,
    error::SimResult, merchant_subsystem::MerchantRecord,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MERCHANTS_CSV: &str = "merchants.csv";
pub const API_KEYS_CSV: &str = "api_keys.csv";
pub const TRANSACTIONS_CSV: &str = "transactions.csv";

/// A row type with a fixed column list. `COLUMNS` must follow the
/// struct's field order.
pub trait CsvRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl CsvRow for MerchantRecord {
    const COLUMNS: &'static [&'static str] = &[
        "merchant_id",
        "signup_timestamp",
        "country",
        "industry",
        "business_type",
        "signup_channel",
    ];
}

impl CsvRow for ApiKeyRecord {
    const COLUMNS: &'static [&'static str] = &[
        "api_key_id",
        "merchant_id",
        "created_timestamp",
        "environment",
        "key_type",
    ];
}

impl CsvRow for TransactionRecord {
    const COLUMNS: &'static [&'static str] = &[
        "transaction_id",
        "merchant_id",
        "transaction_timestamp",
        "environment",
        "status",
        "amount",
        "currency",
        "payment_method",
        "failure_reason",
    ];
}

/// Write the header and every row of `rows` to `writer` as CSV.
/// An empty table still gets its header line.
pub fn write_table<W: Write, T: CsvRow>(writer: W, rows: &[T]) -> SimResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(T::COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the three tables into `dir`, creating it if needed.
/// Returns the written paths in table order.
pub fn write_dataset(dataset: &Dataset, dir: &Path) -> SimResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let merchants = dir.join(MERCHANTS_CSV);
    write_table(std::fs::File::create(&merchants)?, &dataset.merchants)?;

    let api_keys = dir.join(API_KEYS_CSV);
    write_table(std::fs::File::create(&api_keys)?, &dataset.api_keys)?;

    let transactions = dir.join(TRANSACTIONS_CSV);
    write_table(std::fs::File::create(&transactions)?, &dataset.transactions)?;

    log::info!(
        "run={} export: wrote {} merchants, {} api keys, {} transactions to {}",
        dataset.run_id,
        dataset.merchants.len(),
        dataset.api_keys.len(),
        dataset.transactions.len(),
        dir.display()
    );
    Ok(vec![merchants, api_keys, transactions])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimEngine;

    #[test]
    fn transaction_header_and_empty_failure_reason() {
        let dataset = SimEngine::build_test("csv-unit".into(), 5).unwrap().run().unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &dataset.transactions).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "transaction_id,merchant_id,transaction_timestamp,environment,status,amount,currency,payment_method,failure_reason"
        );
        let first_test = lines.find(|l| l.contains(",TEST,")).unwrap();
        assert!(first_test.ends_with(",card,"), "TEST row should end with empty reason: {first_test}");
    }

    #[test]
    fn empty_table_keeps_header() {
        let mut buf = Vec::new();
        write_table::<_, ApiKeyRecord>(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "api_key_id,merchant_id,created_timestamp,environment,key_type\n"
        );
    }
}
