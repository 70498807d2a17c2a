use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

pub const DEFAULT_INITIAL_ARBOS_VERSION: u64 = 10;

/// Genesis description of the child chain, passed to the rollup creator as a
/// JSON string. Fork blocks set to `None` serialize as `null` (never active).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: u64,
    pub homestead_block: Option<u64>,
    pub dao_fork_block: Option<u64>,
    pub dao_fork_support: bool,
    pub eip150_block: Option<u64>,
    pub eip150_hash: B256,
    pub eip155_block: Option<u64>,
    pub eip158_block: Option<u64>,
    pub byzantium_block: Option<u64>,
    pub constantinople_block: Option<u64>,
    pub petersburg_block: Option<u64>,
    pub istanbul_block: Option<u64>,
    pub muir_glacier_block: Option<u64>,
    pub berlin_block: Option<u64>,
    pub london_block: Option<u64>,
    pub clique: CliqueConfig,
    pub arbitrum: ArbitrumChainParams,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueConfig {
    pub period: u64,
    pub epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrumChainParams {
    #[serde(rename = "EnableArbOS")]
    pub enable_arb_os: bool,
    #[serde(rename = "AllowDebugPrecompiles")]
    pub allow_debug_precompiles: bool,
    #[serde(rename = "DataAvailabilityCommittee")]
    pub data_availability_committee: bool,
    #[serde(rename = "InitialArbOSVersion")]
    pub initial_arb_os_version: u64,
    #[serde(rename = "InitialChainOwner")]
    pub initial_chain_owner: Address,
    #[serde(rename = "GenesisBlockNum")]
    pub genesis_block_num: u64,
}

impl ChainConfig {
    /// Every fork active from genesis, ArbOS enabled, no DAC.
    pub fn new(chain_id: u64, chain_owner: Address) -> Self {
        Self {
            chain_id,
            homestead_block: Some(0),
            dao_fork_block: None,
            dao_fork_support: true,
            eip150_block: Some(0),
            eip150_hash: B256::ZERO,
            eip155_block: Some(0),
            eip158_block: Some(0),
            byzantium_block: Some(0),
            constantinople_block: Some(0),
            petersburg_block: Some(0),
            istanbul_block: Some(0),
            muir_glacier_block: Some(0),
            berlin_block: Some(0),
            london_block: Some(0),
            clique: CliqueConfig::default(),
            arbitrum: ArbitrumChainParams {
                enable_arb_os: true,
                allow_debug_precompiles: false,
                data_availability_committee: false,
                initial_arb_os_version: DEFAULT_INITIAL_ARBOS_VERSION,
                initial_chain_owner: chain_owner,
                genesis_block_num: 0,
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::InvalidChainConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::InvalidChainConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id == 0 {
            return Err(ConfigError::InvalidChainConfig(
                "chainId must not be zero".to_string(),
            ));
        }
        if !self.arbitrum.enable_arb_os {
            return Err(ConfigError::InvalidChainConfig(
                "arbitrum.EnableArbOS must be true".to_string(),
            ));
        }
        if self.arbitrum.initial_arb_os_version == 0 {
            return Err(ConfigError::InvalidChainConfig(
                "arbitrum.InitialArbOSVersion must not be zero".to_string(),
            ));
        }
        Ok(())
    }
}
