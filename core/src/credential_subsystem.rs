use crate::{
    clock::day_offset,
    config::GeneratorConfig,
    gates, ids,
    merchant_subsystem::MerchantRecord,
    rng::{RandomStream, SimRng, StageSlot},
    subsystem::MerchantStage,
    types::{EntityId, Environment, Timestamp, KEY_TYPE_SECRET},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiKeyRecord {
    pub api_key_id: EntityId,
    pub merchant_id: EntityId,
    pub created_timestamp: Timestamp,
    pub environment: Environment,
    pub key_type: String,
}

pub struct CredentialSubsystem<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> CredentialSubsystem<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Zero, one (TEST) or two (TEST then LIVE) keys for one merchant.
    /// The LIVE trial is only drawn once a TEST key exists.
    pub fn keys_for<R: RandomStream>(
        &self,
        merchant: &MerchantRecord,
        rng: &mut R,
    ) -> Vec<ApiKeyRecord> {
        let mut keys = Vec::new();
        if !gates::has_api_key(self.config.p_key, rng) {
            return keys;
        }

        keys.push(self.key(
            merchant,
            Environment::Test,
            self.config.test_key_offset_days,
            rng,
        ));

        if gates::has_live_key(self.config.p_live_key, rng) {
            keys.push(self.key(
                merchant,
                Environment::Live,
                self.config.live_key_offset_days,
                rng,
            ));
        }
        keys
    }

    fn key<R: RandomStream>(
        &self,
        merchant: &MerchantRecord,
        environment: Environment,
        offset_days: u32,
        rng: &mut R,
    ) -> ApiKeyRecord {
        ApiKeyRecord {
            api_key_id: ids::api_key_id(rng),
            merchant_id: merchant.merchant_id.clone(),
            created_timestamp: day_offset(merchant.signup_timestamp, i64::from(offset_days)),
            environment,
            key_type: KEY_TYPE_SECRET.to_string(),
        }
    }
}

impl MerchantStage for CredentialSubsystem<'_> {
    type Output = Vec<ApiKeyRecord>;

    fn slot(&self) -> StageSlot {
        StageSlot::Credential
    }

    fn simulate(&self, merchant: &MerchantRecord, rng: &mut SimRng) -> Vec<ApiKeyRecord> {
        self.keys_for(merchant, rng)
    }
}
