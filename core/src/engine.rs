//! The generation engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Merchant roster       (one stream for the whole roster)
//!   2. Credential stage      (one stream per merchant)
//!   3. Activity stage        (one stream per merchant)
//!
//! RULES:
//!   - Configuration is validated before any record is produced.
//!   - All randomness flows through the RngBank.
//!   - Per-merchant stages may fan out across threads; output is
//!     always concatenated in roster order.

use crate::{
    activity_subsystem::ActivitySubsystem,
    config::GeneratorConfig,
    credential_subsystem::CredentialSubsystem,
    dataset::Dataset,
    error::SimResult,
    merchant_subsystem::{MerchantRecord, MerchantSubsystem},
    rng::{RngBank, StageSlot},
    subsystem::MerchantStage,
    types::RunId,
};
use rayon::prelude::*;

pub struct SimEngine {
    pub run_id:   RunId,
    pub config:   GeneratorConfig,
    pub rng_bank: RngBank,
    parallel:     bool,
}

impl SimEngine {
    /// Validates `config` and fails fast on anything out of range.
    pub fn new(run_id: RunId, seed: u64, config: GeneratorConfig) -> SimResult<Self> {
        config.validate()?;
        if config.p_test == 0.0 {
            log::warn!("p_test is 0: no merchant will produce transactions");
        }
        Ok(Self {
            run_id,
            config,
            rng_bank: RngBank::new(seed),
            parallel: false,
        })
    }

    /// Engine over `GeneratorConfig::default_test()`.
    pub fn build_test(run_id: RunId, seed: u64) -> SimResult<Self> {
        Self::new(run_id, seed, GeneratorConfig::default_test())
    }

    /// Simulate per-merchant stages on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Generate the full dataset.
    pub fn run(&self) -> SimResult<Dataset> {
        let config = &self.config;

        let mut roster_rng = self.rng_bank.for_stage(StageSlot::Merchant);
        let merchants = MerchantSubsystem::new(config).generate_roster(&mut roster_rng);
        log::info!("run={} merchant: generated {} merchants", self.run_id, merchants.len());

        let api_keys: Vec<_> = self
            .run_stage(&CredentialSubsystem::new(config), &merchants)
            .into_iter()
            .flatten()
            .collect();
        log::info!("run={} credential: issued {} api keys", self.run_id, api_keys.len());

        let activity = self.run_stage(&ActivitySubsystem::new(config), &merchants);
        let mut transactions = Vec::new();
        let mut outcomes = Vec::with_capacity(activity.len());
        for merchant_activity in activity {
            transactions.extend(merchant_activity.transactions);
            outcomes.push(merchant_activity.outcome);
        }
        log::info!(
            "run={} activity: emitted {} transactions ({} merchants live)",
            self.run_id,
            transactions.len(),
            outcomes.iter().filter(|o| o.is_live()).count()
        );

        Ok(Dataset {
            run_id: self.run_id.clone(),
            seed: self.seed(),
            merchants,
            api_keys,
            transactions,
            outcomes,
        })
    }

    /// Apply a per-merchant stage to every merchant, in roster order.
    fn run_stage<S: MerchantStage>(&self, stage: &S, merchants: &[MerchantRecord]) -> Vec<S::Output> {
        let bank = self.rng_bank;
        let slot = stage.slot();
        let simulate = |(index, merchant): (usize, &MerchantRecord)| {
            let mut rng = bank.for_merchant(slot, index);
            stage.simulate(merchant, &mut rng)
        };

        if self.parallel {
            merchants.par_iter().enumerate().map(simulate).collect()
        } else {
            merchants.iter().enumerate().map(simulate).collect()
        }
    }
}
