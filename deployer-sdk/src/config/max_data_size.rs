use std::fmt;

use alloy::primitives::U256;

/// Expected batch size bound when the parent chain is an Arbitrum chain.
pub const ARBITRUM_PARENT_MAX_DATA_SIZE: u64 = 104_857;
/// Expected batch size bound for any other parent chain.
pub const NON_ARBITRUM_PARENT_MAX_DATA_SIZE: u64 = 117_964;
pub const DEFAULT_MAX_DATA_SIZE: u64 = NON_ARBITRUM_PARENT_MAX_DATA_SIZE;

/// Maximum size in bytes of a batch posted to the sequencer inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDataSize(pub u64);

impl MaxDataSize {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn to_u256(self) -> U256 {
        U256::from(self.0)
    }
}

impl Default for MaxDataSize {
    fn default() -> Self {
        Self(DEFAULT_MAX_DATA_SIZE)
    }
}

impl fmt::Display for MaxDataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the override when present, otherwise the compiled default.
/// Whether the value fits the parent chain is checked separately.
pub fn resolve_max_data_size(override_value: Option<u64>) -> MaxDataSize {
    override_value.map(MaxDataSize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_max_data_size() {
        assert_eq!(resolve_max_data_size(None), MaxDataSize(117_964));
        assert_eq!(resolve_max_data_size(Some(104_857)), MaxDataSize(104_857));
        assert_eq!(resolve_max_data_size(Some(0)), MaxDataSize(0));
        assert_eq!(
            resolve_max_data_size(Some(12_345)),
            resolve_max_data_size(Some(12_345))
        );
    }
}
