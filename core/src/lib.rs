//! Synthetic merchant-activity generator.
//!
//! Produces three tables (merchants, API keys, transactions) for a
//! simulated payments platform from a single master seed. The same
//! seed and config always yield identical tables.

pub mod activity_subsystem;
pub mod clock;
pub mod config;
pub mod credential_subsystem;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod export;
pub mod gates;
pub mod ids;
pub mod merchant_subsystem;
pub mod rng;
pub mod store;
pub mod subsystem;
pub mod types;
