//! Transaction emission: onboarding, activation and ongoing activity.

mod common;

use chrono::Duration;
use common::{config_with, generate, generate_test};
use merchant_sim_core::{
    activity_subsystem::{ActivityOutcome, TransactionRecord},
    config::IntRange,
    types::{Environment, FailureReason, TxnStatus},
};
use std::collections::BTreeMap;

fn live(t: &&TransactionRecord) -> bool {
    t.environment == Environment::Live
}

#[test]
fn test_transactions_are_free_and_successful() {
    let dataset = generate("test-free", 42, config_with(|c| c.merchant_count = 300));
    let tests: Vec<_> = dataset
        .transactions
        .iter()
        .filter(|t| t.environment == Environment::Test)
        .collect();
    assert!(!tests.is_empty());
    for t in tests {
        assert_eq!(t.amount, 0, "TEST txn {} has amount {}", t.transaction_id, t.amount);
        assert_eq!(t.status, TxnStatus::Success);
        assert_eq!(t.failure_reason, None);
    }
}

#[test]
fn failure_reason_present_only_on_failures() {
    // Raise the failure rate so the FAILED branch is well exercised.
    let dataset = generate(
        "failures",
        17,
        config_with(|c| {
            c.merchant_count = 300;
            c.failure_rate = 0.5;
        }),
    );
    let mut failed = 0;
    for t in &dataset.transactions {
        match t.status {
            TxnStatus::Failed => {
                failed += 1;
                let reason = t.failure_reason.expect("FAILED txn without reason");
                assert!(FailureReason::ALL.contains(&reason));
                assert_eq!(t.environment, Environment::Live);
            }
            TxnStatus::Success => assert!(t.failure_reason.is_none()),
        }
    }
    assert!(failed > 0, "Expected some failed activations at failure_rate=0.5");
}

#[test]
fn onboarding_batch_is_one_txn_per_day_from_signup_plus_two() {
    let dataset = generate_test("onboarding", 4);
    for m in &dataset.merchants {
        let tests: Vec<_> = dataset
            .transactions_for(&m.merchant_id)
            .filter(|t| t.environment == Environment::Test)
            .collect();
        if tests.is_empty() {
            continue;
        }
        assert!((5..15).contains(&tests.len()), "batch size {}", tests.len());
        for (i, t) in tests.iter().enumerate() {
            assert_eq!(
                t.transaction_timestamp,
                m.signup_timestamp + Duration::days(2 + i as i64)
            );
        }
    }
}

#[test]
fn live_activity_starts_after_onboarding_in_emission_order() {
    let dataset = generate("emission-order", 12, config_with(|c| c.merchant_count = 300));
    for m in &dataset.merchants {
        let rows: Vec<_> = dataset.transactions_for(&m.merchant_id).collect();
        if let Some(first_live) = rows.iter().position(|t| t.environment == Environment::Live) {
            assert!(
                rows[first_live..].iter().all(|t| t.environment == Environment::Live),
                "{} has TEST rows after its first LIVE row",
                m.merchant_id
            );
        }
    }
}

#[test]
fn activation_is_strictly_later_when_batch_ends_before_activation_window() {
    // Onboarding covers signup+[2, 7); activation is drawn from signup+[7, 20).
    let dataset = generate(
        "strictly-later",
        12,
        config_with(|c| {
            c.merchant_count = 300;
            c.onboarding_batch = IntRange::new(5, 6);
        }),
    );
    let mut checked = 0;
    for m in &dataset.merchants {
        let rows: Vec<_> = dataset.transactions_for(&m.merchant_id).collect();
        let last_test = rows
            .iter()
            .filter(|t| t.environment == Environment::Test)
            .map(|t| t.transaction_timestamp)
            .max();
        let first_live = rows
            .iter()
            .filter(|t| t.environment == Environment::Live)
            .map(|t| t.transaction_timestamp)
            .min();
        if let (Some(last_test), Some(first_live)) = (last_test, first_live) {
            assert!(first_live > last_test, "{}: {first_live} <= {last_test}", m.merchant_id);
            checked += 1;
        }
    }
    assert!(checked > 0, "no activated merchants to check");
}

#[test]
fn closed_test_gate_yields_no_transactions() {
    let dataset = generate(
        "no-test",
        42,
        config_with(|c| {
            c.p_test = 0.0;
            c.p_live = 1.0;
        }),
    );
    assert!(dataset.transactions.is_empty());
    assert!(dataset
        .outcomes
        .iter()
        .all(|o| *o == ActivityOutcome::NoTestTraffic));
}

#[test]
fn closed_live_gate_leaves_merchants_test_only() {
    let dataset = generate(
        "no-live",
        42,
        config_with(|c| {
            c.p_test = 1.0;
            c.p_live = 0.0;
        }),
    );
    assert!(dataset.transactions.iter().all(|t| t.environment == Environment::Test));
    assert!(dataset.outcomes.iter().all(|o| *o == ActivityOutcome::TestOnly));
    assert_eq!(dataset.summary().activation_rate, 0.0);
}

#[test]
fn certain_churn_stops_on_first_ongoing_day() {
    let dataset = generate(
        "churn-day-one",
        42,
        config_with(|c| {
            c.p_test = 1.0;
            c.p_live = 1.0;
            c.p_churn_daily = 1.0;
        }),
    );

    for (m, outcome) in dataset.merchants.iter().zip(&dataset.outcomes) {
        let ActivityOutcome::Live { activated_on, churned_on, .. } = *outcome else {
            panic!("{} should be live", m.merchant_id);
        };
        assert_eq!(churned_on, Some(activated_on + Duration::days(1)));

        let live_rows: Vec<_> = dataset.transactions_for(&m.merchant_id).filter(live).collect();
        assert_eq!(live_rows.len(), 1, "only the activation txn should be LIVE");
        assert_eq!(live_rows[0].transaction_timestamp, activated_on);
    }
}

#[test]
fn power_users_transact_every_ongoing_day() {
    let dataset = generate(
        "power-users",
        8,
        config_with(|c| {
            c.merchant_count = 40;
            c.p_test = 1.0;
            c.p_live = 1.0;
            c.p_power = 1.0;
            c.power_daily_count = IntRange::new(1, 4);
        }),
    );

    for (m, outcome) in dataset.merchants.iter().zip(&dataset.outcomes) {
        let ActivityOutcome::Live { activated_on, power_user, churned_on } = *outcome else {
            panic!("{} should be live", m.merchant_id);
        };
        assert!(power_user);

        let mut per_day: BTreeMap<_, usize> = BTreeMap::new();
        for t in dataset.transactions_for(&m.merchant_id).filter(live) {
            if t.transaction_timestamp > activated_on {
                *per_day.entry(t.transaction_timestamp).or_default() += 1;
            }
        }

        let end = churned_on.unwrap_or(activated_on + Duration::days(60));
        let mut day = activated_on + Duration::days(1);
        while day < end {
            let n = per_day.get(&day).copied().unwrap_or(0);
            assert!((1..=3).contains(&n), "{} had {n} txns on {day}", m.merchant_id);
            day += Duration::days(1);
        }
        assert!(per_day.keys().all(|d| *d < end), "activity after churn/horizon");
    }
}

#[test]
fn activity_stays_inside_horizon() {
    let dataset = generate(
        "horizon",
        77,
        config_with(|c| {
            c.p_churn_daily = 0.0;
            c.horizon_days = 10;
        }),
    );
    for (m, outcome) in dataset.merchants.iter().zip(&dataset.outcomes) {
        if let ActivityOutcome::Live { activated_on, churned_on, .. } = *outcome {
            assert_eq!(churned_on, None, "p_churn_daily=0 must never churn");
            for t in dataset.transactions_for(&m.merchant_id).filter(live) {
                assert!(t.transaction_timestamp < activated_on + Duration::days(10));
            }
        }
    }
}

#[test]
fn live_amounts_fall_in_configured_range() {
    let dataset = generate_test("amounts", 3);
    for t in dataset.transactions.iter().filter(live) {
        assert!(
            (2_000..80_000).contains(&t.amount),
            "amount {} outside [2000, 80000)",
            t.amount
        );
        assert_eq!(t.currency, "NGN");
    }
}

#[test]
fn outcome_matches_transaction_table() {
    let dataset = generate("outcomes", 5, config_with(|c| c.merchant_count = 200));
    for (m, outcome) in dataset.merchants.iter().zip(&dataset.outcomes) {
        let rows: Vec<_> = dataset.transactions_for(&m.merchant_id).collect();
        match outcome {
            ActivityOutcome::NoTestTraffic => assert!(rows.is_empty()),
            ActivityOutcome::TestOnly => {
                assert!(!rows.is_empty());
                assert!(rows.iter().all(|t| t.environment == Environment::Test));
            }
            ActivityOutcome::Live { activated_on, .. } => {
                let first_live = rows.iter().find(|t| t.environment == Environment::Live);
                assert_eq!(first_live.map(|t| t.transaction_timestamp), Some(*activated_on));
            }
        }
    }
}
