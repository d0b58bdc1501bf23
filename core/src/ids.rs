//! Reproducible record identifiers.
//!
//! Identifiers are hex-truncated UUIDs built from stream bytes, so the
//! same seed always mints the same ids. Collisions are not checked;
//! 40 bits of entropy per merchant id is ample for a run.

use crate::rng::RandomStream;
use crate::types::EntityId;
use uuid::Builder;

pub const MERCHANT_PREFIX: &str = "m_";
pub const API_KEY_PREFIX: &str = "k_";
pub const TRANSACTION_PREFIX: &str = "t_";

const MERCHANT_HEX_LEN: usize = 10;
const API_KEY_HEX_LEN: usize = 10;
const TRANSACTION_HEX_LEN: usize = 12;

fn mint<R: RandomStream>(prefix: &str, hex_len: usize, rng: &mut R) -> EntityId {
    let uuid = Builder::from_random_bytes(rng.next_bytes_16()).into_uuid();
    let hex = uuid.simple().to_string();
    format!("{prefix}{}", &hex[..hex_len])
}

pub fn merchant_id<R: RandomStream>(rng: &mut R) -> EntityId {
    mint(MERCHANT_PREFIX, MERCHANT_HEX_LEN, rng)
}

pub fn api_key_id<R: RandomStream>(rng: &mut R) -> EntityId {
    mint(API_KEY_PREFIX, API_KEY_HEX_LEN, rng)
}

pub fn transaction_id<R: RandomStream>(rng: &mut R) -> EntityId {
    mint(TRANSACTION_PREFIX, TRANSACTION_HEX_LEN, rng)
}
