//! Transaction emission for one merchant's lifecycle.
//!
//! STAGES (fixed order, each a named gate):
//!   1. Test-traffic gate      → no transactions at all if it fails
//!   2. Onboarding batch       → k TEST txns, one per day from signup + offset
//!   3. Activation gate        → merchant stays test-only if it fails
//!   4. Activation transaction → first LIVE txn, may be FAILED
//!   5. Ongoing activity       → daily LIVE txns until horizon or churn
//!
//! The activation day is drawn independently of the onboarding batch,
//! so the two may overlap. That overlap is part of the dataset.

use crate::{
    clock::{day_offset, DayCursor},
    config::{GeneratorConfig, IntRange},
    gates, ids,
    merchant_subsystem::MerchantRecord,
    rng::{RandomStream, SimRng, StageSlot},
    subsystem::MerchantStage,
    types::{EntityId, Environment, FailureReason, PaymentMethod, Timestamp, TxnStatus},
};
use serde::{Deserialize, Serialize};

/// Onboarding traffic always uses card.
pub const TEST_PAYMENT_METHOD: PaymentMethod = PaymentMethod::Card;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id: EntityId,
    pub merchant_id: EntityId,
    pub transaction_timestamp: Timestamp,
    pub environment: Environment,
    pub status: TxnStatus,
    pub amount: u64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub failure_reason: Option<FailureReason>,
}

/// Where a merchant's lifecycle ended. Not persisted; this is the
/// label downstream churn models derive from the transaction table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActivityOutcome {
    /// Failed the test-traffic gate.
    NoTestTraffic,
    /// Sent test traffic but never went live.
    TestOnly,
    Live {
        activated_on: Timestamp,
        power_user: bool,
        /// Day the churn check fired; None if the horizon was reached.
        churned_on: Option<Timestamp>,
    },
}

impl ActivityOutcome {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    pub fn churned(&self) -> bool {
        matches!(self, Self::Live { churned_on: Some(_), .. })
    }
}

#[derive(Debug, Clone)]
pub struct MerchantActivity {
    pub transactions: Vec<TransactionRecord>,
    pub outcome: ActivityOutcome,
}

pub struct ActivitySubsystem<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ActivitySubsystem<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Run one merchant through the full lifecycle.
    pub fn simulate_merchant<R: RandomStream>(
        &self,
        merchant: &MerchantRecord,
        rng: &mut R,
    ) -> MerchantActivity {
        let cfg = self.config;
        let mut transactions = Vec::new();

        if !gates::sends_test_traffic(cfg.p_test, rng) {
            return MerchantActivity {
                transactions,
                outcome: ActivityOutcome::NoTestTraffic,
            };
        }

        self.emit_onboarding_batch(merchant, &mut transactions, rng);

        if !gates::activates(cfg.p_live, rng) {
            return MerchantActivity {
                transactions,
                outcome: ActivityOutcome::TestOnly,
            };
        }

        let activated_on = self.emit_activation(merchant, &mut transactions, rng);

        let power_user = gates::is_power_user(cfg.p_power, rng);
        let daily_count = if power_user {
            cfg.power_daily_count
        } else {
            cfg.regular_daily_count
        };

        let mut churned_on = None;
        for day in DayCursor::after(activated_on, cfg.horizon_days) {
            if gates::churns_today(cfg.p_churn_daily, rng) {
                churned_on = Some(day);
                break;
            }
            self.emit_daily_volume(merchant, day, daily_count, &mut transactions, rng);
        }

        log::debug!(
            "merchant={} live: {} txns, power_user={power_user}, churned_on={churned_on:?}",
            merchant.merchant_id,
            transactions.len(),
        );

        MerchantActivity {
            transactions,
            outcome: ActivityOutcome::Live {
                activated_on,
                power_user,
                churned_on,
            },
        }
    }

    fn emit_onboarding_batch<R: RandomStream>(
        &self,
        merchant: &MerchantRecord,
        out: &mut Vec<TransactionRecord>,
        rng: &mut R,
    ) {
        let cfg = self.config;
        let batch = rng.uniform_i64(cfg.onboarding_batch.low, cfg.onboarding_batch.high);
        let first_day = i64::from(cfg.onboarding_offset_days);

        for i in 0..batch {
            let day = day_offset(merchant.signup_timestamp, first_day + i);
            out.push(self.record(
                merchant,
                day,
                Environment::Test,
                TxnStatus::Success,
                0,
                TEST_PAYMENT_METHOD,
                None,
                rng,
            ));
        }
    }

    /// Emits the first LIVE transaction and returns its day.
    fn emit_activation<R: RandomStream>(
        &self,
        merchant: &MerchantRecord,
        out: &mut Vec<TransactionRecord>,
        rng: &mut R,
    ) -> Timestamp {
        let cfg = self.config;
        let offset = rng.uniform_i64(cfg.activation_offset.low, cfg.activation_offset.high);
        let day = day_offset(merchant.signup_timestamp, offset);

        let (status, failure_reason) = if gates::activation_fails(cfg.failure_rate, rng) {
            (TxnStatus::Failed, Some(*rng.pick(&FailureReason::ALL)))
        } else {
            (TxnStatus::Success, None)
        };
        let amount = draw_amount(cfg.amount, rng);
        let method = *rng.pick(&PaymentMethod::ALL);

        out.push(self.record(
            merchant,
            day,
            Environment::Live,
            status,
            amount,
            method,
            failure_reason,
            rng,
        ));
        day
    }

    fn emit_daily_volume<R: RandomStream>(
        &self,
        merchant: &MerchantRecord,
        day: Timestamp,
        daily_count: IntRange,
        out: &mut Vec<TransactionRecord>,
        rng: &mut R,
    ) {
        let count = rng.uniform_i64(daily_count.low, daily_count.high);
        for _ in 0..count {
            let amount = draw_amount(self.config.amount, rng);
            let method = *rng.pick(&PaymentMethod::ALL);
            out.push(self.record(
                merchant,
                day,
                Environment::Live,
                TxnStatus::Success,
                amount,
                method,
                None,
                rng,
            ));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn record<R: RandomStream>(
        &self,
        merchant: &MerchantRecord,
        day: Timestamp,
        environment: Environment,
        status: TxnStatus,
        amount: u64,
        payment_method: PaymentMethod,
        failure_reason: Option<FailureReason>,
        rng: &mut R,
    ) -> TransactionRecord {
        TransactionRecord {
            transaction_id: ids::transaction_id(rng),
            merchant_id: merchant.merchant_id.clone(),
            transaction_timestamp: day,
            environment,
            status,
            amount,
            currency: self.config.currency.clone(),
            payment_method,
            failure_reason,
        }
    }
}

/// Validated configs keep amount bounds non-negative.
fn draw_amount<R: RandomStream>(range: IntRange, rng: &mut R) -> u64 {
    rng.uniform_i64(range.low, range.high).max(0) as u64
}

impl MerchantStage for ActivitySubsystem<'_> {
    type Output = MerchantActivity;

    fn slot(&self) -> StageSlot {
        StageSlot::Activity
    }

    fn simulate(&self, merchant: &MerchantRecord, rng: &mut SimRng) -> MerchantActivity {
        self.simulate_merchant(merchant, rng)
    }
}
