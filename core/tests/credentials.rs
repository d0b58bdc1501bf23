//! API key issuance.

mod common;

use chrono::Duration;
use common::{config_with, generate};
use merchant_sim_core::types::Environment;

#[test]
fn live_key_always_follows_an_earlier_test_key() {
    let dataset = generate("keys-order", 21, config_with(|c| c.merchant_count = 400));

    for key in dataset.api_keys.iter().filter(|k| k.environment == Environment::Live) {
        let earlier_test = dataset.keys_for(&key.merchant_id).any(|k| {
            k.environment == Environment::Test && k.created_timestamp < key.created_timestamp
        });
        assert!(
            earlier_test,
            "LIVE key {} for {} has no earlier TEST key",
            key.api_key_id, key.merchant_id
        );
    }
}

#[test]
fn keys_are_dated_from_signup() {
    let dataset = generate("keys-dates", 5, config_with(|c| c.merchant_count = 200));

    for m in &dataset.merchants {
        let keys: Vec<_> = dataset.keys_for(&m.merchant_id).collect();
        assert!(keys.len() <= 2, "{} has {} keys", m.merchant_id, keys.len());
        for k in keys {
            let expected = match k.environment {
                Environment::Test => m.signup_timestamp + Duration::days(1),
                Environment::Live => m.signup_timestamp + Duration::days(5),
            };
            assert_eq!(k.created_timestamp, expected);
            assert_eq!(k.key_type, "secret");
            assert!(k.api_key_id.starts_with("k_"));
        }
    }
}

#[test]
fn no_keys_when_key_gate_is_closed() {
    let dataset = generate(
        "keys-closed",
        9,
        config_with(|c| {
            c.p_key = 0.0;
            c.p_live_key = 1.0;
        }),
    );
    assert!(dataset.api_keys.is_empty(), "p_key=0 must suppress LIVE keys too");
}

#[test]
fn both_keys_when_both_gates_are_certain() {
    let dataset = generate(
        "keys-certain",
        9,
        config_with(|c| {
            c.p_key = 1.0;
            c.p_live_key = 1.0;
        }),
    );
    assert_eq!(dataset.api_keys.len(), 2 * dataset.merchants.len());

    let summary = dataset.summary();
    assert_eq!(summary.live_keys, dataset.merchants.len());
}

#[test]
fn key_rate_tracks_probability() {
    let dataset = generate("keys-rate", 31, config_with(|c| c.merchant_count = 2000));
    let with_key = dataset
        .merchants
        .iter()
        .filter(|m| dataset.keys_for(&m.merchant_id).next().is_some())
        .count();
    let rate = with_key as f64 / 2000.0;
    assert!((0.80..0.90).contains(&rate), "key rate {rate:.3} far from 0.85");
}
