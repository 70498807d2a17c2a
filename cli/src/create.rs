use std::{fs, path::Path};

use rollup_deployer_sdk::{
    config::{chain_config::ChainConfig, error::ConfigError, max_data_size::resolve_max_data_size},
    external_api::contract::artifacts::ArtifactStore,
    rollup_creation::{create_rollup, parse_addresses, CreateRollupParams, RollupInstanceHandle},
};

use crate::{chain::connect, env_var::EnvVar, error::CliError};

pub fn load_chain_config(path: &Path) -> Result<ChainConfig, ConfigError> {
    let json = fs::read_to_string(path)
        .map_err(|e| ConfigError::InvalidChainConfig(format!("{path:?}: {e}")))?;
    ChainConfig::from_json(&json)
}

pub fn create_rollup_params(env: &EnvVar) -> Result<CreateRollupParams, CliError> {
    let chain_config = env
        .chain_config_path
        .as_deref()
        .map(load_chain_config)
        .transpose()?;
    Ok(CreateRollupParams {
        is_development: env.dev_deployment,
        rollup_creator: env.rollup_creator_address.clone(),
        fee_token: env.fee_token_address.clone(),
        fee_token_pricer: env.fee_token_pricer_address.clone(),
        stake_token: env.stake_token_address.clone(),
        max_data_size: resolve_max_data_size(env.max_data_size),
        chain_id: env.l2_chain_id,
        chain_config,
        validators: env.validators.clone(),
        batch_posters: env.batch_posters.clone(),
        batch_poster_manager: env.batch_poster_manager.clone(),
        deploy_factories_to_l2: env.deploy_factories_to_l2,
    })
}

/// Creates a rollup through an already deployed rollup creator.
pub async fn create(env: &EnvVar) -> Result<RollupInstanceHandle, CliError> {
    let params = create_rollup_params(env)?;
    let addresses = parse_addresses(&params)?;
    // artifacts are only read when a fee token has to be deployed
    let needs_token = addresses.fee_token.needs_deployment();
    let artifacts = if needs_token && env.artifacts_dir.exists() {
        ArtifactStore::open(&env.artifacts_dir)?
    } else {
        ArtifactStore::default()
    };
    let chain = connect(env, false).await?;
    let handle = create_rollup(chain, &artifacts, &params).await?;
    println!("Rollup: {:?}", handle.rollup);
    println!("Inbox: {:?}", handle.inbox);
    println!("Sequencer inbox: {:?}", handle.sequencer_inbox);
    println!("Bridge: {:?}", handle.bridge);
    println!("Native token: {:?}", handle.native_token);
    Ok(handle)
}
