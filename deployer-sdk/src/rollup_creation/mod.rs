use std::sync::Arc;

use alloy::primitives::{uint, Address, Bytes, B256, U256};

use crate::{
    config::{
        addresses::{parse_address_list, parse_optional_address},
        chain_config::ChainConfig,
        error::ConfigError,
        fee_token::{resolve_fee_token_config, FeeTokenConfiguration},
        max_data_size::MaxDataSize,
        resolve_rollup_config, RollupConfig, DEFAULT_CHAIN_ID,
    },
    external_api::{
        chain::interface::ChainInterface,
        contract::{
            artifacts::ArtifactStore,
            erc20_contract::{default_fee_token_supply, ERC20Contract, TEST_TOKEN_ARTIFACT},
            rollup_creator_contract::{
                find_rollup_created, CreateRollupArgs, RollupCreatorContract,
            },
        },
    },
};

use error::CreateRollupError;

pub mod error;

/// 0.13 ether, paid by the factory to create the L2 factory deployments through retryables.
pub const FEE_COST_FOR_RETRYABLES: U256 = uint!(130_000_000_000_000_000_U256);
/// 0.1 gwei.
pub const MAX_FEE_PER_GAS_FOR_RETRYABLES: U256 = uint!(100_000_000_U256);

/// Raw inputs of a rollup creation. Address values are kept as given so that
/// every one of them is checked before anything is sent.
#[derive(Debug, Clone, Default)]
pub struct CreateRollupParams {
    pub is_development: bool,
    pub rollup_creator: Option<String>,
    pub fee_token: Option<String>,
    pub fee_token_pricer: Option<String>,
    pub stake_token: Option<String>,
    pub max_data_size: MaxDataSize,
    pub chain_id: Option<u64>,
    pub chain_config: Option<ChainConfig>,
    /// Comma-separated; the signer when empty.
    pub validators: Option<String>,
    /// Comma-separated; the signer when empty.
    pub batch_posters: Option<String>,
    pub batch_poster_manager: Option<String>,
    pub deploy_factories_to_l2: bool,
}

/// Addresses of a newly created rollup instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupInstanceHandle {
    pub rollup: Address,
    pub native_token: Address,
    pub inbox: Address,
    pub outbox: Address,
    pub rollup_event_inbox: Address,
    pub challenge_manager: Address,
    pub admin_proxy: Address,
    pub sequencer_inbox: Address,
    pub bridge: Address,
    pub upgrade_executor: Address,
    pub validator_wallet_creator: Address,
    pub fee_token_deployed: bool,
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

enum FeeTokenSource {
    Existing(Address),
    Deploy(Bytes),
}

/// Address inputs of a rollup creation, parsed without touching the chain.
/// Unset validators, batch posters and manager are filled in with the signer
/// later.
#[derive(Debug, Clone)]
pub struct ParsedAddresses {
    pub rollup_creator: Address,
    pub stake_token: Address,
    pub fee_token: FeeTokenConfiguration,
    pub validators: Vec<Address>,
    pub batch_posters: Vec<Address>,
    pub batch_poster_manager: Option<Address>,
}

#[derive(Debug, Clone)]
struct ValidatedParams {
    rollup_creator: Address,
    fee_token: FeeTokenConfiguration,
    config: RollupConfig,
    validators: Vec<Address>,
    batch_posters: Vec<Address>,
    batch_poster_manager: Address,
}

/// Checks every address input. Needs no connection, so callers can run it
/// before connecting to the parent chain.
pub fn parse_addresses(params: &CreateRollupParams) -> Result<ParsedAddresses, ConfigError> {
    let rollup_creator =
        parse_optional_address("Rollup creator address", params.rollup_creator.as_deref())?
            .ok_or(ConfigError::MissingAddress("ROLLUP_CREATOR_ADDRESS"))?;
    let stake_token =
        parse_optional_address("Stake token address", params.stake_token.as_deref())?
            .ok_or(ConfigError::MissingAddress("STAKE_TOKEN_ADDRESS"))?;
    let fee_token = resolve_fee_token_config(
        params.fee_token.as_deref(),
        params.fee_token_pricer.as_deref(),
    )?;
    Ok(ParsedAddresses {
        rollup_creator,
        stake_token,
        fee_token,
        validators: parse_address_list("Validator address", params.validators.as_deref())?,
        batch_posters: parse_address_list(
            "Batch poster address",
            params.batch_posters.as_deref(),
        )?,
        batch_poster_manager: parse_optional_address(
            "Batch poster manager address",
            params.batch_poster_manager.as_deref(),
        )?,
    })
}

fn validate_params(
    params: &CreateRollupParams,
    signer: Address,
) -> Result<ValidatedParams, ConfigError> {
    let ParsedAddresses {
        rollup_creator,
        stake_token,
        fee_token,
        mut validators,
        mut batch_posters,
        batch_poster_manager,
    } = parse_addresses(params)?;
    if validators.is_empty() {
        validators.push(signer);
    }
    if batch_posters.is_empty() {
        batch_posters.push(signer);
    }
    let batch_poster_manager = batch_poster_manager.unwrap_or(signer);

    let mut config = if params.is_development {
        RollupConfig::development(params.chain_id.unwrap_or(DEFAULT_CHAIN_ID), signer)
    } else {
        resolve_rollup_config()
    };
    if let Some(chain_config) = &params.chain_config {
        config = config.with_chain_config(chain_config.clone());
    }
    if let Some(chain_id) = params.chain_id {
        config = config.with_chain_id(chain_id);
    }
    let config = config.with_stake_token(stake_token);
    config.validate()?;

    Ok(ValidatedParams {
        rollup_creator,
        fee_token,
        config,
        validators,
        batch_posters,
        batch_poster_manager,
    })
}

/// Creates one rollup instance through the factory at `params.rollup_creator`.
///
/// Everything is validated before the first transaction. A fresh `TestToken`
/// becomes the fee token when none is given.
pub async fn create_rollup(
    chain: Arc<dyn ChainInterface>,
    artifacts: &ArtifactStore,
    params: &CreateRollupParams,
) -> Result<RollupInstanceHandle, CreateRollupError> {
    let signer = chain.signer_address();
    let validated = validate_params(params, signer)?;
    let fee_token_source = match validated.fee_token.fee_token {
        Some(fee_token) => FeeTokenSource::Existing(fee_token),
        None => FeeTokenSource::Deploy(artifacts.bytecode(TEST_TOKEN_ARTIFACT)?),
    };

    let native_token = match fee_token_source {
        FeeTokenSource::Existing(fee_token) => fee_token,
        FeeTokenSource::Deploy(bytecode) => {
            log::info!("FEE_TOKEN_ADDRESS not provided, deploying new ERC20 token");
            let (token, _) =
                ERC20Contract::deploy(chain.clone(), &bytecode, default_fee_token_supply()).await?;
            token.address
        }
    };
    log::info!(
        "Creating new rollup with {:?} as fee token and {:?} as fee token pricer",
        native_token,
        validated.fee_token.fee_token_pricer
    );

    let creator = RollupCreatorContract::new(chain.clone(), validated.rollup_creator);
    let mut value = U256::ZERO;
    if params.deploy_factories_to_l2 {
        if native_token == Address::ZERO {
            value = FEE_COST_FOR_RETRYABLES;
        } else {
            ERC20Contract::new(chain.clone(), native_token)
                .approve(creator.address, FEE_COST_FOR_RETRYABLES)
                .await?;
        }
    }

    let args = CreateRollupArgs {
        config: validated.config,
        validators: validated.validators,
        max_data_size: params.max_data_size,
        native_token,
        deploy_factories_to_l2: params.deploy_factories_to_l2,
        max_fee_per_gas_for_retryables: MAX_FEE_PER_GAS_FOR_RETRYABLES,
        batch_posters: validated.batch_posters,
        batch_poster_manager: validated.batch_poster_manager,
        fee_token_pricer: validated.fee_token.fee_token_pricer,
    };
    let outcome = creator
        .create_rollup(args.to_deployment_params()?, value)
        .await?;
    let event = find_rollup_created(creator.address, &outcome.logs)?
        .ok_or(CreateRollupError::RollupCreatedEventMissing(outcome.tx_hash))?;

    let handle = RollupInstanceHandle {
        rollup: event.rollupAddress,
        native_token: event.nativeToken,
        inbox: event.inboxAddress,
        outbox: event.outbox,
        rollup_event_inbox: event.rollupEventInbox,
        challenge_manager: event.challengeManager,
        admin_proxy: event.adminProxy,
        sequencer_inbox: event.sequencerInbox,
        bridge: event.bridge,
        upgrade_executor: event.upgradeExecutor,
        validator_wallet_creator: event.validatorWalletCreator,
        fee_token_deployed: validated.fee_token.needs_deployment(),
        tx_hash: outcome.tx_hash,
        block_number: outcome.block_number,
    };
    log::info!(
        "Rollup created at {:?} (tx {:?}, block {:?})",
        handle.rollup,
        handle.tx_hash,
        handle.block_number
    );
    Ok(handle)
}
