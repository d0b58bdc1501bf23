//! Named Bernoulli gates.
//!
//! Each branch point of the simulation is its own function of
//! (probability, stream). Generators call these, never `chance()`
//! directly, so every branch can be driven by a fixed stream in tests.

use crate::rng::RandomStream;

/// Merchant ever creates an API key.
pub fn has_api_key<R: RandomStream>(p_key: f64, rng: &mut R) -> bool {
    rng.chance(p_key)
}

/// Merchant that already holds a TEST key also creates a LIVE key.
pub fn has_live_key<R: RandomStream>(p_live_key: f64, rng: &mut R) -> bool {
    rng.chance(p_live_key)
}

/// Merchant sends any onboarding test traffic.
pub fn sends_test_traffic<R: RandomStream>(p_test: f64, rng: &mut R) -> bool {
    rng.chance(p_test)
}

/// Test-stage merchant goes live.
pub fn activates<R: RandomStream>(p_live: f64, rng: &mut R) -> bool {
    rng.chance(p_live)
}

/// Activation transaction fails.
pub fn activation_fails<R: RandomStream>(failure_rate: f64, rng: &mut R) -> bool {
    rng.chance(failure_rate)
}

/// Activated merchant becomes a high-volume user.
pub fn is_power_user<R: RandomStream>(p_power: f64, rng: &mut R) -> bool {
    rng.chance(p_power)
}

/// Merchant goes inactive today. Checked before the day's volume is drawn.
pub fn churns_today<R: RandomStream>(p_churn_daily: f64, rng: &mut R) -> bool {
    rng.chance(p_churn_daily)
}
