//! sim-runner: headless dataset generator for the merchant simulator.
//!
//! Usage:
//!   sim-runner --seed 42 --out ./out
//!   sim-runner --seed 42 --merchants 2000 --horizon 180 --db run.db
//!   sim-runner --config data/generator_config.json --parallel --json

use anyhow::Result;
use chrono::NaiveDate;
use merchant_sim_core::{
    config::GeneratorConfig, dataset::DatasetSummary, engine::SimEngine, export,
    store::SimStore,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = seed_arg(&args)?;
    let parallel = has_flag(&args, "--parallel");
    let json = has_flag(&args, "--json");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(n) = flag_value(&args, "--merchants") {
        config.merchant_count = n.parse()?;
    }
    if let Some(days) = flag_value(&args, "--horizon") {
        config.horizon_days = days.parse()?;
    }
    if let Some(start) = flag_value(&args, "--start") {
        config.start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d")?;
    }

    log::debug!("sim-runner: config = {config:?}");

    let out_dir = flag_value(&args, "--out");
    let db = flag_value(&args, "--db");

    if !json {
        println!("Merchant simulator — sim-runner");
        println!("  seed:       {seed}");
        println!("  merchants:  {}", config.merchant_count);
        println!("  start:      {}", config.start_date);
        println!("  horizon:    {} days", config.horizon_days);
        println!("  parallel:   {parallel}");
        println!("  out:        {}", out_dir.unwrap_or("(none)"));
        println!("  db:         {}", db.unwrap_or("(none)"));
        println!();
    }

    let run_id = format!("run-{seed}-{}", unix_now());
    let engine = SimEngine::new(run_id.clone(), seed, config)?.with_parallel(parallel);
    let dataset = engine.run()?;

    if let Some(dir) = out_dir {
        export::write_dataset(&dataset, Path::new(dir))?;
    }

    if let Some(path) = db {
        let store = SimStore::open(path)?;
        store.migrate()?;
        store.insert_run(&run_id, seed, env!("CARGO_PKG_VERSION"), &engine.config)?;
        store.save_dataset(&dataset)?;
    }

    let summary = dataset.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(s: &DatasetSummary) {
    println!("=== RUN SUMMARY ===");
    println!("  run_id:          {}", s.run_id);
    println!("  merchants:       {}", s.merchants);
    println!("  api keys:        {} ({} live)", s.api_keys, s.live_keys);
    println!("  transactions:    {}", s.transactions);
    println!("    test:          {}", s.test_transactions);
    println!("    live:          {}", s.live_transactions);
    println!("    failed:        {}", s.failed_transactions);
    println!("  live volume:     {}", s.live_volume);
    println!("  activation rate: {:.1}%", s.activation_rate * 100.0);
    println!("  test-only:       {}", s.test_only_merchants);
    println!("  power users:     {}", s.power_users);
    println!("  churned:         {}", s.churned_merchants);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// `--seed`, defaulting to 42. A malformed value is an error.
fn seed_arg(args: &[String]) -> Result<u64> {
    match flag_value(args, "--seed") {
        Some(v) => v
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid --seed {v:?}: {e}")),
        None => Ok(42),
    }
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
