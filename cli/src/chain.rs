use std::sync::Arc;

use rollup_deployer_sdk::external_api::chain::{
    alloy_chain::{get_address_from_private_key, AlloyChain},
    interface::ChainInterface,
    local::{LocalChain, LOCAL_DEPLOYER},
};

use crate::{env_var::EnvVar, error::CliError};

/// Connection used to send every transaction of a run. With `simulate`, an
/// in-memory chain stands in for the node.
pub async fn connect(env: &EnvVar, simulate: bool) -> Result<Arc<dyn ChainInterface>, CliError> {
    if simulate {
        let signer = match env.deployer_privkey {
            Some(private_key) => get_address_from_private_key(private_key)?,
            None => LOCAL_DEPLOYER,
        };
        log::warn!("DRY_RUN is set, transactions from {signer:?} are simulated in memory");
        return Ok(Arc::new(LocalChain::new(signer)));
    }
    let chain = AlloyChain::connect(&env.rpc_url, env.deployer_privkey).await?;
    log::info!(
        "Connected to {}, sending from {:?}",
        env.rpc_url,
        chain.signer_address()
    );
    Ok(Arc::new(chain))
}
