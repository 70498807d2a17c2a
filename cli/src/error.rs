use envy::Error as EnvyError;
use rollup_deployer_sdk::{
    config::error::ConfigError,
    deployment::error::DeploymentError,
    external_api::contract::{artifacts::ArtifactError, error::BlockchainError},
    rollup_creation::error::CreateRollupError,
};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Env error: {0}")]
    EnvError(#[from] EnvyError),

    #[error("Blockchain error: {0}")]
    BlockchainError(#[from] BlockchainError),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Artifact error: {0}")]
    ArtifactError(#[from] ArtifactError),

    #[error("Deployment failed: {0}")]
    DeploymentError(#[from] DeploymentError),

    #[error("Rollup creation failed: {0}")]
    CreateRollupError(#[from] CreateRollupError),
}
