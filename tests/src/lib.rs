use std::{path::PathBuf, sync::Arc};

use alloy::primitives::B256;
use rollup_deployer_sdk::external_api::{
    chain::{alloy_chain::AlloyChain, interface::ChainInterface},
    contract::artifacts::ArtifactStore,
};
use serde::Deserialize;

/// Settings of the live tests, read from the environment (or `.env`).
#[derive(Deserialize)]
pub struct EnvVar {
    pub rpc_url: String,
    pub deployer_private_key: Option<B256>,
    pub artifacts_dir: PathBuf,
}

pub fn load_env() -> anyhow::Result<EnvVar> {
    dotenvy::dotenv().ok();
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();
    Ok(envy::from_env::<EnvVar>()?)
}

pub async fn connect(env: &EnvVar) -> anyhow::Result<(Arc<dyn ChainInterface>, ArtifactStore)> {
    let chain = AlloyChain::connect(&env.rpc_url, env.deployer_private_key).await?;
    let artifacts = ArtifactStore::open(&env.artifacts_dir)?;
    Ok((Arc::new(chain), artifacts))
}
