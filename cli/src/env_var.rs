use std::path::PathBuf;

use alloy::primitives::B256;
use serde::Deserialize;

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("build/contracts")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct EnvVar {
    // connection
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    pub deployer_privkey: Option<B256>,

    // contract deployment
    pub max_data_size: Option<u64>,
    pub ignore_max_data_size_warning: Option<String>,
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    #[serde(default = "default_true")]
    pub verify_deployment: bool,
    #[serde(default)]
    pub dry_run: bool,

    // rollup creation
    pub rollup_creator_address: Option<String>,
    pub stake_token_address: Option<String>,
    pub fee_token_address: Option<String>,
    pub fee_token_pricer_address: Option<String>,
    #[serde(default)]
    pub dev_deployment: bool,
    pub l2_chain_id: Option<u64>,
    pub chain_config_path: Option<PathBuf>,
    pub validators: Option<String>,
    pub batch_posters: Option<String>,
    pub batch_poster_manager: Option<String>,
    #[serde(default)]
    pub deploy_factories_to_l2: bool,
}

impl EnvVar {
    /// Only the literal `true` disables the check.
    pub fn ignore_max_data_size_warning(&self) -> bool {
        self.ignore_max_data_size_warning.as_deref() == Some("true")
    }
}
