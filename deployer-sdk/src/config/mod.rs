use alloy::primitives::{address, b256, utils::Unit, Address, B256, U256};

use chain_config::ChainConfig;
use error::ConfigError;

pub mod addresses;
pub mod chain_config;
pub mod error;
pub mod fee_token;
pub mod max_data_size;

pub const DEFAULT_CONFIRM_PERIOD_BLOCKS: u64 = 45818;
pub const DEV_CONFIRM_PERIOD_BLOCKS: u64 = 20;
pub const DEFAULT_EXTRA_CHALLENGE_TIME_BLOCKS: u64 = 200;
pub const DEFAULT_CHAIN_ID: u64 = 1337;
pub const DEFAULT_WASM_MODULE_ROOT: B256 =
    b256!("da4e3ad5e7feacb817c21c8d0220da7650fe9051ece68a3f0b1c5d38bbb27b21");
pub const DEFAULT_OWNER: Address = address!("1234123412341234123412341234123412341234");

/// Bounds on how far sequencer inbox messages may lag or lead the parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxTimeVariation {
    pub delay_blocks: u64,
    pub future_blocks: u64,
    pub delay_seconds: u64,
    pub future_seconds: u64,
}

impl Default for MaxTimeVariation {
    fn default() -> Self {
        Self {
            delay_blocks: 5760,
            future_blocks: 12,
            delay_seconds: 86400,
            future_seconds: 3600,
        }
    }
}

/// Parameters of a rollup instance. Built once per run; the `with_*` builders
/// consume the value so a config is never modified in place after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupConfig {
    pub confirm_period_blocks: u64,
    pub extra_challenge_time_blocks: u64,
    pub stake_token: Address,
    pub base_stake: U256,
    pub wasm_module_root: B256,
    pub owner: Address,
    pub loser_stake_escrow: Address,
    pub chain_id: u64,
    pub chain_config: ChainConfig,
    pub genesis_block_num: u64,
    pub sequencer_inbox_max_time_variation: MaxTimeVariation,
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            confirm_period_blocks: DEFAULT_CONFIRM_PERIOD_BLOCKS,
            extra_challenge_time_blocks: DEFAULT_EXTRA_CHALLENGE_TIME_BLOCKS,
            stake_token: Address::ZERO,
            base_stake: Unit::ETHER.wei(),
            wasm_module_root: DEFAULT_WASM_MODULE_ROOT,
            owner: DEFAULT_OWNER,
            loser_stake_escrow: Address::ZERO,
            chain_id: DEFAULT_CHAIN_ID,
            chain_config: ChainConfig::new(DEFAULT_CHAIN_ID, DEFAULT_OWNER),
            genesis_block_num: 0,
            sequencer_inbox_max_time_variation: MaxTimeVariation::default(),
        }
    }
}

impl RollupConfig {
    /// Short confirm period, deployer-owned chain.
    pub fn development(chain_id: u64, owner: Address) -> Self {
        Self {
            confirm_period_blocks: DEV_CONFIRM_PERIOD_BLOCKS,
            owner,
            chain_id,
            chain_config: ChainConfig::new(chain_id, owner),
            ..Self::default()
        }
    }

    pub fn with_stake_token(self, stake_token: Address) -> Self {
        Self {
            stake_token,
            ..self
        }
    }

    pub fn with_chain_id(self, chain_id: u64) -> Self {
        let mut chain_config = self.chain_config;
        chain_config.chain_id = chain_id;
        Self {
            chain_id,
            chain_config,
            ..self
        }
    }

    /// Replaces the genesis descriptor and adopts its chain id.
    pub fn with_chain_config(self, chain_config: ChainConfig) -> Self {
        Self {
            chain_id: chain_config.chain_id,
            chain_config,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain_config.validate()?;
        if self.chain_config.chain_id != self.chain_id {
            return Err(ConfigError::InconsistentRollupConfig(format!(
                "chain config chainId {} does not match rollup chainId {}",
                self.chain_config.chain_id, self.chain_id
            )));
        }
        if self.chain_config.arbitrum.genesis_block_num != self.genesis_block_num {
            return Err(ConfigError::InconsistentRollupConfig(format!(
                "chain config GenesisBlockNum {} does not match rollup genesisBlockNum {}",
                self.chain_config.arbitrum.genesis_block_num, self.genesis_block_num
            )));
        }
        if self.confirm_period_blocks == 0 {
            return Err(ConfigError::InconsistentRollupConfig(
                "confirmPeriodBlocks must not be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// The compiled-in rollup configuration.
pub fn resolve_rollup_config() -> RollupConfig {
    RollupConfig::default()
}
