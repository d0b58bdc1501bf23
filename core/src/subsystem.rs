//! Per-merchant stage trait.
//!
//! RULE: Every stage that runs once per merchant implements
//! MerchantStage. The engine calls simulate() for each merchant in
//! roster order, handing it that merchant's private stream.
//! A stage never sees another merchant's records or stream.

use crate::{merchant_subsystem::MerchantRecord, rng::SimRng, rng::StageSlot};

/// The contract every per-merchant stage must fulfill.
pub trait MerchantStage: Sync {
    /// What one merchant contributes to the stage's output.
    type Output: Send;

    /// Stable slot used to derive this stage's streams.
    fn slot(&self) -> StageSlot;

    /// Generate this merchant's records.
    ///
    /// - `merchant`: the roster entry, immutable
    /// - `rng`:      this merchant's deterministic stream for this stage
    fn simulate(&self, merchant: &MerchantRecord, rng: &mut SimRng) -> Self::Output;
}
