//! Block header as delivered by the node subscription.

use primitive_types::{H256, U256};

use crate::{GAS_LIMIT_DIVISOR, GAS_USED_DIVISOR};

/// Number of hash bytes shown in console lines.
const HASH_PREFIX_BYTES: usize = 4;

/// Header fields the dashboard derives its metrics from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block number.
    pub number: u64,
    /// Block hash.
    pub hash: H256,
    /// Gas limit, in the chain's native unit.
    pub gas_limit: U256,
    /// Gas used, in the chain's native unit.
    pub gas_used: U256,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
}

impl BlockHeader {
    /// Gas limit in millions of gas units, truncated.
    pub fn gas_limit_sample(&self) -> u64 {
        (self.gas_limit / U256::from(GAS_LIMIT_DIVISOR)).low_u64()
    }

    /// Gas used divided by the flat reduction factor, truncated.
    pub fn gas_used_sample(&self) -> u64 {
        (self.gas_used / U256::from(GAS_USED_DIVISOR)).low_u64()
    }

    /// Seconds elapsed since `previous`.
    ///
    /// A timestamp that goes backwards yields 0.
    pub fn seconds_since(&self, previous: &BlockHeader) -> u64 {
        self.timestamp.saturating_sub(previous.timestamp)
    }

    /// Lowercase hex of the first four hash bytes.
    pub fn hash_prefix(&self) -> String {
        self.hash.as_bytes()[..HASH_PREFIX_BYTES]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Console line announcing this block.
    pub fn log_line(&self) -> String {
        format!("Added block: {} {}", self.number, self.hash_prefix())
    }
}
