//! Shared helpers for integration tests.
#![allow(dead_code)]

use merchant_sim_core::{config::GeneratorConfig, dataset::Dataset, engine::SimEngine};

/// Test config with overrides applied.
pub fn config_with(tweak: impl FnOnce(&mut GeneratorConfig)) -> GeneratorConfig {
    let mut config = GeneratorConfig::default_test();
    tweak(&mut config);
    config
}

/// Run a fresh engine to completion.
pub fn generate(run_id: &str, seed: u64, config: GeneratorConfig) -> Dataset {
    SimEngine::new(run_id.into(), seed, config)
        .expect("valid config")
        .run()
        .expect("generation")
}

pub fn generate_test(run_id: &str, seed: u64) -> Dataset {
    generate(run_id, seed, GeneratorConfig::default_test())
}
