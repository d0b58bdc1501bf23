use crate::{
    clock::day_offset,
    config::GeneratorConfig,
    ids,
    rng::RandomStream,
    types::{BusinessType, EntityId, Industry, SignupChannel, Timestamp},
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantRecord {
    pub merchant_id: EntityId,
    pub signup_timestamp: Timestamp,
    pub country: String,
    pub industry: Industry,
    pub business_type: BusinessType,
    pub signup_channel: SignupChannel,
}

pub struct MerchantSubsystem<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> MerchantSubsystem<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Midnight of the configured start date.
    pub fn start_timestamp(&self) -> Timestamp {
        self.config.start_date.and_time(NaiveTime::MIN)
    }

    /// Build the full roster from a single stream, in roster order.
    pub fn generate_roster<R: RandomStream>(&self, rng: &mut R) -> Vec<MerchantRecord> {
        let n = self.config.merchant_count;
        let start = self.start_timestamp();
        let mut merchants = Vec::with_capacity(n);

        for _ in 0..n {
            let offset = rng.uniform_i64(0, i64::from(self.config.signup_window_days));
            let signup_timestamp = day_offset(start, offset);

            merchants.push(MerchantRecord {
                merchant_id: ids::merchant_id(rng),
                signup_timestamp,
                country: self.config.country.clone(),
                industry: *rng.pick(&Industry::ALL),
                business_type: *rng.pick(&BusinessType::ALL),
                signup_channel: *rng.pick(&SignupChannel::ALL),
            });
        }
        merchants
    }
}
