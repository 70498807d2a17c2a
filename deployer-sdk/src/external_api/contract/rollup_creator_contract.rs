use std::sync::Arc;

use alloy::{
    primitives::{Address, Log, B256, U256},
    sol,
    sol_types::{SolCall as _, SolEvent as _},
};

use crate::{
    config::{error::ConfigError, max_data_size::MaxDataSize, RollupConfig},
    external_api::chain::interface::{ChainInterface, TxOutcome},
};

use super::error::BlockchainError;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct MaxTimeVariation {
        uint256 delayBlocks;
        uint256 futureBlocks;
        uint256 delaySeconds;
        uint256 futureSeconds;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Config {
        uint64 confirmPeriodBlocks;
        uint64 extraChallengeTimeBlocks;
        address stakeToken;
        uint256 baseStake;
        bytes32 wasmModuleRoot;
        address owner;
        address loserStakeEscrow;
        uint256 chainId;
        string chainConfig;
        uint64 genesisBlockNum;
        MaxTimeVariation sequencerInboxMaxTimeVariation;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct RollupDeploymentParams {
        Config config;
        address[] validators;
        uint256 maxDataSize;
        address nativeToken;
        bool deployFactoriesToL2;
        uint256 maxFeePerGasForRetryables;
        address[] batchPosters;
        address batchPosterManager;
        address feeTokenPricer;
    }

    #[derive(Debug, PartialEq, Eq)]
    contract RollupCreator {
        event RollupCreated(
            address indexed rollupAddress,
            address indexed nativeToken,
            address inboxAddress,
            address outbox,
            address rollupEventInbox,
            address challengeManager,
            address adminProxy,
            address sequencerInbox,
            address bridge,
            address upgradeExecutor,
            address validatorWalletCreator
        );

        function setTemplates(
            address bridgeCreator,
            address osp,
            address challengeManagerLogic,
            address rollupAdminLogic,
            address rollupUserLogic,
            address upgradeExecutorLogic,
            address validatorWalletCreator,
            address l2FactoriesDeployer
        ) external;

        function createRollup(RollupDeploymentParams memory deployParams)
            external
            payable
            returns (address);
    }
}

/// Converts the rollup configuration to its ABI form. The genesis descriptor is
/// serialized to JSON here and nowhere else.
pub fn encode_config(config: &RollupConfig) -> Result<Config, ConfigError> {
    let variation = &config.sequencer_inbox_max_time_variation;
    Ok(Config {
        confirmPeriodBlocks: config.confirm_period_blocks,
        extraChallengeTimeBlocks: config.extra_challenge_time_blocks,
        stakeToken: config.stake_token,
        baseStake: config.base_stake,
        wasmModuleRoot: config.wasm_module_root,
        owner: config.owner,
        loserStakeEscrow: config.loser_stake_escrow,
        chainId: U256::from(config.chain_id),
        chainConfig: config.chain_config.to_json()?,
        genesisBlockNum: config.genesis_block_num,
        sequencerInboxMaxTimeVariation: MaxTimeVariation {
            delayBlocks: U256::from(variation.delay_blocks),
            futureBlocks: U256::from(variation.future_blocks),
            delaySeconds: U256::from(variation.delay_seconds),
            futureSeconds: U256::from(variation.future_seconds),
        },
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRollupArgs {
    pub config: RollupConfig,
    pub validators: Vec<Address>,
    pub max_data_size: MaxDataSize,
    pub native_token: Address,
    pub deploy_factories_to_l2: bool,
    pub max_fee_per_gas_for_retryables: U256,
    pub batch_posters: Vec<Address>,
    pub batch_poster_manager: Address,
    pub fee_token_pricer: Address,
}

impl CreateRollupArgs {
    pub fn to_deployment_params(&self) -> Result<RollupDeploymentParams, ConfigError> {
        Ok(RollupDeploymentParams {
            config: encode_config(&self.config)?,
            validators: self.validators.clone(),
            maxDataSize: self.max_data_size.to_u256(),
            nativeToken: self.native_token,
            deployFactoriesToL2: self.deploy_factories_to_l2,
            maxFeePerGasForRetryables: self.max_fee_per_gas_for_retryables,
            batchPosters: self.batch_posters.clone(),
            batchPosterManager: self.batch_poster_manager,
            feeTokenPricer: self.fee_token_pricer,
        })
    }
}

/// The eight template addresses registered on the factory, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateAddresses {
    pub bridge_creator: Address,
    pub osp: Address,
    pub challenge_manager: Address,
    pub rollup_admin: Address,
    pub rollup_user: Address,
    pub upgrade_executor: Address,
    pub validator_wallet_creator: Address,
    pub deploy_helper: Address,
}

impl TemplateAddresses {
    pub fn to_call(&self) -> RollupCreator::setTemplatesCall {
        RollupCreator::setTemplatesCall {
            bridgeCreator: self.bridge_creator,
            osp: self.osp,
            challengeManagerLogic: self.challenge_manager,
            rollupAdminLogic: self.rollup_admin,
            rollupUserLogic: self.rollup_user,
            upgradeExecutorLogic: self.upgrade_executor,
            validatorWalletCreator: self.validator_wallet_creator,
            l2FactoriesDeployer: self.deploy_helper,
        }
    }
}

/// First `RollupCreated` event emitted by `creator` among `logs`.
pub fn find_rollup_created(
    creator: Address,
    logs: &[Log],
) -> Result<Option<RollupCreator::RollupCreated>, BlockchainError> {
    let Some(log) = logs.iter().find(|log| {
        log.address == creator
            && log.topics().first() == Some(&RollupCreator::RollupCreated::SIGNATURE_HASH)
    }) else {
        return Ok(None);
    };
    let event = RollupCreator::RollupCreated::decode_log_data(&log.data)
        .map_err(|e| BlockchainError::DecodeError(format!("RollupCreated: {e}")))?;
    Ok(Some(event))
}

#[derive(Debug, Clone)]
pub struct RollupCreatorContract {
    pub chain: Arc<dyn ChainInterface>,
    pub address: Address,
}

impl RollupCreatorContract {
    pub fn new(chain: Arc<dyn ChainInterface>, address: Address) -> Self {
        Self { chain, address }
    }

    pub async fn set_templates(
        &self,
        templates: &TemplateAddresses,
    ) -> Result<B256, BlockchainError> {
        let calldata = templates.to_call().abi_encode();
        let outcome = self
            .chain
            .send("setTemplates", self.address, calldata.into(), U256::ZERO)
            .await?;
        Ok(outcome.tx_hash)
    }

    pub async fn create_rollup(
        &self,
        params: RollupDeploymentParams,
        value: U256,
    ) -> Result<TxOutcome, BlockchainError> {
        let calldata = RollupCreator::createRollupCall {
            deployParams: params,
        }
        .abi_encode();
        self.chain
            .send("createRollup", self.address, calldata.into(), value)
            .await
    }
}
