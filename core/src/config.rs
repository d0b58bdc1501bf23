use crate::error::{SimError, SimResult};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Upper bound for every day offset, window and day-valued range.
/// Keeps every generated date well inside chrono's range.
pub const MAX_SPAN_DAYS: u32 = 36_500;

/// Upper bound for the per-day transaction count ranges.
pub const MAX_DAILY_COUNT: i64 = 10_000;

/// Half-open integer range [low, high).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntRange {
    pub low: i64,
    pub high: i64,
}

impl IntRange {
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    fn check(&self, field: &'static str) -> SimResult<()> {
        if self.low >= self.high {
            return Err(SimError::invalid_config(
                field,
                format!("range [{}, {}) is empty", self.low, self.high),
            ));
        }
        Ok(())
    }

    fn check_non_negative(&self, field: &'static str) -> SimResult<()> {
        self.check(field)?;
        if self.low < 0 {
            return Err(SimError::invalid_config(
                field,
                format!("lower bound {} is negative", self.low),
            ));
        }
        Ok(())
    }

    fn check_bounded(&self, field: &'static str, max: i64) -> SimResult<()> {
        self.check_non_negative(field)?;
        if self.high > max {
            return Err(SimError::invalid_config(
                field,
                format!("upper bound {} exceeds {max}", self.high),
            ));
        }
        Ok(())
    }
}

/// Every knob of the generator. Field defaults reproduce the
/// reference dataset; a JSON file may override any subset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    // ── Roster ─────────────────────────────────────────────────
    pub merchant_count: usize,
    pub start_date: NaiveDate,
    /// Signup offset is drawn from [0, signup_window_days).
    pub signup_window_days: u32,
    pub country: String,
    pub currency: String,

    // ── Credentials ────────────────────────────────────────────
    pub p_key: f64,
    pub p_live_key: f64,
    pub test_key_offset_days: u32,
    pub live_key_offset_days: u32,

    // ── Onboarding ─────────────────────────────────────────────
    pub p_test: f64,
    pub onboarding_batch: IntRange,
    pub onboarding_offset_days: u32,

    // ── Activation ─────────────────────────────────────────────
    pub p_live: f64,
    pub activation_offset: IntRange,
    pub failure_rate: f64,
    pub amount: IntRange,

    // ── Ongoing activity ───────────────────────────────────────
    pub p_power: f64,
    pub p_churn_daily: f64,
    /// Days of ongoing activity after activation.
    pub horizon_days: u32,
    pub power_daily_count: IntRange,
    pub regular_daily_count: IntRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            merchant_count: 800,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            signup_window_days: 60,
            country: "NG".into(),
            currency: "NGN".into(),

            p_key: 0.85,
            p_live_key: 0.65,
            test_key_offset_days: 1,
            live_key_offset_days: 5,

            p_test: 0.75,
            onboarding_batch: IntRange::new(5, 15),
            onboarding_offset_days: 2,

            p_live: 0.55,
            activation_offset: IntRange::new(7, 20),
            failure_rate: 0.08,
            amount: IntRange::new(2_000, 80_000),

            p_power: 0.35,
            p_churn_daily: 0.02,
            horizon_days: 240,
            power_daily_count: IntRange::new(1, 4),
            regular_daily_count: IntRange::new(0, 2),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Config with a small roster and short horizon for use in tests.
    pub fn default_test() -> Self {
        Self {
            merchant_count: 50,
            horizon_days: 60,
            ..Self::default()
        }
    }

    /// Reject anything the generator cannot honour. Called by the
    /// engine before any record is produced.
    pub fn validate(&self) -> SimResult<()> {
        let probabilities = [
            ("p_key", self.p_key),
            ("p_live_key", self.p_live_key),
            ("p_test", self.p_test),
            ("p_live", self.p_live),
            ("p_power", self.p_power),
            ("failure_rate", self.failure_rate),
            ("p_churn_daily", self.p_churn_daily),
        ];
        for (field, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::invalid_config(
                    field,
                    format!("probability {p} is outside [0, 1]"),
                ));
            }
        }

        if self.horizon_days == 0 {
            return Err(SimError::invalid_config("horizon_days", "must be > 0"));
        }
        if self.signup_window_days == 0 {
            return Err(SimError::invalid_config("signup_window_days", "must be > 0"));
        }
        for (field, days) in [
            ("horizon_days", self.horizon_days),
            ("signup_window_days", self.signup_window_days),
            ("test_key_offset_days", self.test_key_offset_days),
            ("live_key_offset_days", self.live_key_offset_days),
            ("onboarding_offset_days", self.onboarding_offset_days),
        ] {
            if days > MAX_SPAN_DAYS {
                return Err(SimError::invalid_config(
                    field,
                    format!("{days} exceeds {MAX_SPAN_DAYS} days"),
                ));
            }
        }
        if self.country.trim().is_empty() {
            return Err(SimError::invalid_config("country", "must not be blank"));
        }
        if self.currency.trim().is_empty() {
            return Err(SimError::invalid_config("currency", "must not be blank"));
        }

        let span = i64::from(MAX_SPAN_DAYS);
        self.onboarding_batch.check_bounded("onboarding_batch", span)?;
        self.activation_offset.check_bounded("activation_offset", span)?;
        self.amount.check_non_negative("amount")?;
        self.power_daily_count.check_bounded("power_daily_count", MAX_DAILY_COUNT)?;
        self.regular_daily_count.check_bounded("regular_daily_count", MAX_DAILY_COUNT)?;

        let last_day = self
            .start_date
            .checked_add_signed(Duration::days(self.furthest_offset_days()));
        if last_day.is_none() {
            return Err(SimError::invalid_config(
                "start_date",
                format!(
                    "{} plus {} days is outside the calendar",
                    self.start_date,
                    self.furthest_offset_days()
                ),
            ));
        }
        Ok(())
    }

    /// Days from `start_date` to the latest day any record can carry.
    /// Only meaningful once the individual bounds have been checked.
    fn furthest_offset_days(&self) -> i64 {
        let onboarding_end =
            i64::from(self.onboarding_offset_days) + self.onboarding_batch.high;
        let after_signup = onboarding_end
            .max(self.activation_offset.high + i64::from(self.horizon_days))
            .max(i64::from(self.test_key_offset_days))
            .max(i64::from(self.live_key_offset_days));
        i64::from(self.signup_window_days) + after_signup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GeneratorConfig::default().validate().unwrap();
        GeneratorConfig::default_test().validate().unwrap();
    }

    #[test]
    fn nan_probability_is_rejected() {
        let config = GeneratorConfig {
            p_power: f64::NAN,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { field: "p_power", .. })
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "merchant_count": 3, "amount": { "low": 10, "high": 20 } }"#)
                .unwrap();
        assert_eq!(config.merchant_count, 3);
        assert_eq!(config.amount, IntRange::new(10, 20));
        assert_eq!(config.horizon_days, 240);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
