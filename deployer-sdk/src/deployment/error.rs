use alloy::primitives::Address;

use crate::{
    config::error::ConfigError,
    external_api::contract::{artifacts::ArtifactError, error::BlockchainError},
};

use super::ContractRole;

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("Blockchain error: {0}")]
    Blockchain(#[from] BlockchainError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{step} requires {dependency}, which has not been deployed")]
    MissingDependency {
        step: ContractRole,
        dependency: ContractRole,
    },

    #[error("{0} is missing from the deployed contracts")]
    MissingRole(ContractRole),

    #[error("No code at {address:?} after deploying {role}")]
    NoCodeAtAddress { role: ContractRole, address: Address },
}
