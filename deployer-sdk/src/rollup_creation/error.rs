use alloy::primitives::B256;

use crate::{
    config::error::ConfigError,
    external_api::contract::{artifacts::ArtifactError, error::BlockchainError},
};

#[derive(Debug, thiserror::Error)]
pub enum CreateRollupError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Blockchain error: {0}")]
    Blockchain(#[from] BlockchainError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("createRollup tx {0:?} emitted no RollupCreated event")]
    RollupCreatedEventMissing(B256),
}
