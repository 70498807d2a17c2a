use std::{collections::BTreeMap, fmt, sync::Arc};

use alloy::primitives::{Address, B256};

use crate::{
    config::max_data_size::MaxDataSize,
    environment::{detect_parent_chain, validate_max_data_size},
    external_api::{
        chain::interface::{ChainInterface, DeployedContract},
        contract::{artifacts::ArtifactStore, rollup_creator_contract::TemplateAddresses},
    },
};

use error::DeploymentError;
use pipeline::DeploymentPipeline;

pub mod error;
pub mod pipeline;
pub mod steps;

/// Logical position of a contract in the deployed system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractRole {
    Reader4844,
    EthBridge,
    EthSequencerInbox,
    EthInbox,
    EthRollupEventInbox,
    EthOutbox,
    Erc20Bridge,
    Erc20SequencerInbox,
    Erc20Inbox,
    Erc20RollupEventInbox,
    Erc20Outbox,
    OneStepProver0,
    OneStepProverMemory,
    OneStepProverMath,
    OneStepProverHostIo,
    ChallengeManager,
    RollupAdminLogic,
    RollupUserLogic,
    BridgeCreator,
    OneStepProofEntry,
    RollupCreator,
    UpgradeExecutor,
    ValidatorWalletCreator,
    DeployHelper,
}

impl ContractRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reader4844 => "Reader4844",
            Self::EthBridge => "EthBridge",
            Self::EthSequencerInbox => "EthSequencerInbox",
            Self::EthInbox => "EthInbox",
            Self::EthRollupEventInbox => "EthRollupEventInbox",
            Self::EthOutbox => "EthOutbox",
            Self::Erc20Bridge => "Erc20Bridge",
            Self::Erc20SequencerInbox => "Erc20SequencerInbox",
            Self::Erc20Inbox => "Erc20Inbox",
            Self::Erc20RollupEventInbox => "Erc20RollupEventInbox",
            Self::Erc20Outbox => "Erc20Outbox",
            Self::OneStepProver0 => "OneStepProver0",
            Self::OneStepProverMemory => "OneStepProverMemory",
            Self::OneStepProverMath => "OneStepProverMath",
            Self::OneStepProverHostIo => "OneStepProverHostIo",
            Self::ChallengeManager => "ChallengeManager",
            Self::RollupAdminLogic => "RollupAdminLogic",
            Self::RollupUserLogic => "RollupUserLogic",
            Self::BridgeCreator => "BridgeCreator",
            Self::OneStepProofEntry => "OneStepProofEntry",
            Self::RollupCreator => "RollupCreator",
            Self::UpgradeExecutor => "UpgradeExecutor",
            Self::ValidatorWalletCreator => "ValidatorWalletCreator",
            Self::DeployHelper => "DeployHelper",
        }
    }

    /// Name of the compiled artifact holding the role's creation bytecode.
    /// The ETH and ERC20 sequencer inboxes share one contract.
    pub fn artifact(self) -> &'static str {
        match self {
            Self::EthBridge => "Bridge",
            Self::EthSequencerInbox | Self::Erc20SequencerInbox => "SequencerInbox",
            Self::EthInbox => "Inbox",
            Self::EthRollupEventInbox => "RollupEventInbox",
            Self::EthOutbox => "Outbox",
            Self::Erc20Bridge => "ERC20Bridge",
            Self::Erc20Inbox => "ERC20Inbox",
            Self::Erc20RollupEventInbox => "ERC20RollupEventInbox",
            Self::Erc20Outbox => "ERC20Outbox",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addresses produced by a pipeline run, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployedContractSet {
    contracts: BTreeMap<ContractRole, DeployedContract>,
}

impl DeployedContractSet {
    pub fn insert(&mut self, role: ContractRole, contract: DeployedContract) {
        self.contracts.insert(role, contract);
    }

    pub fn get(&self, role: ContractRole) -> Option<Address> {
        self.contracts.get(&role).map(|c| c.address)
    }

    pub fn contains(&self, role: ContractRole) -> bool {
        self.contracts.contains_key(&role)
    }

    pub fn require(&self, role: ContractRole) -> Result<Address, DeploymentError> {
        match self.get(role) {
            Some(address) if address != Address::ZERO => Ok(address),
            _ => Err(DeploymentError::MissingRole(role)),
        }
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContractRole, &DeployedContract)> {
        self.contracts.iter().map(|(role, c)| (*role, c))
    }

    /// The `setTemplates` arguments. Fails if any of them has not been deployed.
    pub fn templates(&self) -> Result<TemplateAddresses, DeploymentError> {
        Ok(TemplateAddresses {
            bridge_creator: self.require(ContractRole::BridgeCreator)?,
            osp: self.require(ContractRole::OneStepProofEntry)?,
            challenge_manager: self.require(ContractRole::ChallengeManager)?,
            rollup_admin: self.require(ContractRole::RollupAdminLogic)?,
            rollup_user: self.require(ContractRole::RollupUserLogic)?,
            upgrade_executor: self.require(ContractRole::UpgradeExecutor)?,
            validator_wallet_creator: self.require(ContractRole::ValidatorWalletCreator)?,
            deploy_helper: self.require(ContractRole::DeployHelper)?,
        })
    }
}

/// A deployment whose templates are registered on the rollup creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedDeployment {
    pub contracts: DeployedContractSet,
    pub templates: TemplateAddresses,
    pub rollup_creator: Address,
    pub set_templates_tx_hash: B256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploySettings {
    pub max_data_size: MaxDataSize,
    pub ignore_max_data_size_warning: bool,
    pub verify: bool,
}

/// Checks the batch size bound against the parent chain, deploys every
/// contract and registers the templates on the rollup creator.
pub async fn deploy_rollup_contracts(
    chain: Arc<dyn ChainInterface>,
    artifacts: ArtifactStore,
    settings: DeploySettings,
) -> Result<FinalizedDeployment, DeploymentError> {
    log::info!(
        "Deploying contracts with maxDataSize: {}",
        settings.max_data_size
    );
    let parent = detect_parent_chain(chain.as_ref()).await?;
    if settings.ignore_max_data_size_warning {
        log::warn!("Ignoring maxDataSize warning");
    } else {
        validate_max_data_size(parent, settings.max_data_size)?;
    }

    let pipeline = DeploymentPipeline::new(chain, artifacts);
    let deployed = pipeline
        .deploy_all_on(parent, settings.max_data_size, settings.verify)
        .await?;
    pipeline.set_templates(deployed).await
}
