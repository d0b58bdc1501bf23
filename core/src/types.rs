//! Shared primitive types used across the entire simulator.
//!
//! Every categorical column is a closed enum. Each enum carries an
//! `ALL` table used for uniform draws; NEVER reorder those tables,
//! reordering changes which value a given seed picks.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A stable, unique identifier for any generated record.
pub type EntityId = String;

/// The canonical run identifier.
pub type RunId = String;

/// Day-granular timestamp. Every generated timestamp sits at midnight.
pub type Timestamp = NaiveDateTime;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Industry {
    Ecommerce,
    SaaS,
    Education,
    Logistics,
    Fintech,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Self::Ecommerce,
        Self::SaaS,
        Self::Education,
        Self::Logistics,
        Self::Fintech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ecommerce => "Ecommerce",
            Self::SaaS      => "SaaS",
            Self::Education => "Education",
            Self::Logistics => "Logistics",
            Self::Fintech   => "Fintech",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BusinessType {
    #[serde(rename = "SME")]
    Sme,
    Enterprise,
}

impl BusinessType {
    pub const ALL: [BusinessType; 2] = [Self::Sme, Self::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sme        => "SME",
            Self::Enterprise => "Enterprise",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SignupChannel {
    Web,
    Referral,
    Sales,
}

impl SignupChannel {
    pub const ALL: [SignupChannel; 3] = [Self::Web, Self::Referral, Self::Sales];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web      => "Web",
            Self::Referral => "Referral",
            Self::Sales    => "Sales",
        }
    }
}

/// Which side of the platform a key or transaction belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Test,
    Live,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "TEST",
            Self::Live => "LIVE",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxnStatus {
    Success,
    Failed,
}

impl TxnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed  => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Bank,
    Ussd,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Card, Self::Bank, Self::Ussd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Bank => "bank",
            Self::Ussd => "ussd",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FailureReason {
    #[serde(rename = "Insufficient Funds")]
    InsufficientFunds,
    #[serde(rename = "Bank Timeout")]
    BankTimeout,
    #[serde(rename = "Network Error")]
    NetworkError,
    #[serde(rename = "Invalid Card")]
    InvalidCard,
}

impl FailureReason {
    pub const ALL: [FailureReason; 4] = [
        Self::InsufficientFunds,
        Self::BankTimeout,
        Self::NetworkError,
        Self::InvalidCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientFunds => "Insufficient Funds",
            Self::BankTimeout       => "Bank Timeout",
            Self::NetworkError      => "Network Error",
            Self::InvalidCard       => "Invalid Card",
        }
    }
}

/// Only secret keys are simulated.
pub const KEY_TYPE_SECRET: &str = "secret";
