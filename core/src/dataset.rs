//! The generator's output: three tables plus per-merchant outcomes.

use crate::{
    activity_subsystem::{ActivityOutcome, TransactionRecord},
    credential_subsystem::ApiKeyRecord,
    merchant_subsystem::MerchantRecord,
    types::{Environment, RunId, TxnStatus},
};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub run_id: RunId,
    pub seed: u64,
    pub merchants: Vec<MerchantRecord>,
    pub api_keys: Vec<ApiKeyRecord>,
    pub transactions: Vec<TransactionRecord>,
    /// One entry per merchant, in roster order.
    pub outcomes: Vec<ActivityOutcome>,
}

/// Headline figures for a generated dataset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub run_id: RunId,
    pub seed: u64,
    pub merchants: usize,
    pub api_keys: usize,
    pub live_keys: usize,
    pub transactions: usize,
    pub test_transactions: usize,
    pub live_transactions: usize,
    pub failed_transactions: usize,
    /// Sum of successful LIVE amounts. Failed activations move no money.
    pub live_volume: u64,
    /// Share of merchants with at least one successful LIVE transaction.
    pub activation_rate: f64,
    pub test_only_merchants: usize,
    pub power_users: usize,
    pub churned_merchants: usize,
}

impl Dataset {
    pub fn transactions_for<'a>(
        &'a self,
        merchant_id: &'a str,
    ) -> impl Iterator<Item = &'a TransactionRecord> + 'a {
        self.transactions
            .iter()
            .filter(move |t| t.merchant_id == merchant_id)
    }

    pub fn keys_for<'a>(&'a self, merchant_id: &'a str) -> impl Iterator<Item = &'a ApiKeyRecord> + 'a {
        self.api_keys.iter().filter(move |k| k.merchant_id == merchant_id)
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut test_transactions = 0;
        let mut live_transactions = 0;
        let mut failed_transactions = 0;
        let mut live_volume = 0u64;
        let mut activated: HashSet<&str> = HashSet::new();

        for t in &self.transactions {
            match t.environment {
                Environment::Test => test_transactions += 1,
                Environment::Live => {
                    live_transactions += 1;
                    if t.status == TxnStatus::Success {
                        live_volume += t.amount;
                        activated.insert(&t.merchant_id);
                    }
                }
            }
            if t.status == TxnStatus::Failed {
                failed_transactions += 1;
            }
        }

        let activation_rate = if self.merchants.is_empty() {
            0.0
        } else {
            activated.len() as f64 / self.merchants.len() as f64
        };

        let mut test_only_merchants = 0;
        let mut power_users = 0;
        let mut churned_merchants = 0;
        for outcome in &self.outcomes {
            match outcome {
                ActivityOutcome::TestOnly => test_only_merchants += 1,
                ActivityOutcome::Live { power_user, .. } => {
                    if *power_user {
                        power_users += 1;
                    }
                    if outcome.churned() {
                        churned_merchants += 1;
                    }
                }
                ActivityOutcome::NoTestTraffic => {}
            }
        }

        DatasetSummary {
            run_id: self.run_id.clone(),
            seed: self.seed,
            merchants: self.merchants.len(),
            api_keys: self.api_keys.len(),
            live_keys: self
                .api_keys
                .iter()
                .filter(|k| k.environment == Environment::Live)
                .count(),
            transactions: self.transactions.len(),
            test_transactions,
            live_transactions,
            failed_transactions,
            live_volume,
            activation_rate,
            test_only_merchants,
            power_users,
            churned_merchants,
        }
    }
}
