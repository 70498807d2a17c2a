use alloy::{primitives::Address, sol_types::SolConstructor as _};

use crate::{
    config::max_data_size::MaxDataSize,
    environment::ParentChain,
    external_api::contract::template_contracts::{
        BridgeCreator, BridgeTemplates, Inbox, OneStepProofEntry, SequencerInbox,
    },
};

use super::{error::DeploymentError, ContractRole, DeployedContractSet};

/// Inputs available to a step when its constructor arguments are encoded.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub parent: ParentChain,
    pub max_data_size: MaxDataSize,
    pub deployed: &'a DeployedContractSet,
}

impl StepContext<'_> {
    fn address(&self, role: ContractRole) -> Result<Address, DeploymentError> {
        self.deployed.require(role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCondition {
    Always,
    /// Arbitrum chains provide blob data natively.
    ParentNotArbitrum,
}

impl StepCondition {
    pub fn applies(self, parent: ParentChain) -> bool {
        match self {
            Self::Always => true,
            Self::ParentNotArbitrum => !parent.is_arbitrum(),
        }
    }
}

pub type ConstructorArgs = fn(&StepContext<'_>) -> Result<Vec<u8>, DeploymentError>;

/// One contract creation. `requires` lists the roles whose addresses go into
/// the constructor; the driver refuses to run the step until all are present.
/// `requires_outside_arbitrum` is added to them when the parent chain is not
/// Arbitrum.
#[derive(Clone, Copy)]
pub struct DeploymentStep {
    pub role: ContractRole,
    pub requires: &'static [ContractRole],
    pub requires_outside_arbitrum: &'static [ContractRole],
    pub condition: StepCondition,
    pub constructor_args: ConstructorArgs,
}

impl DeploymentStep {
    const fn new(role: ContractRole) -> Self {
        Self {
            role,
            requires: &[],
            requires_outside_arbitrum: &[],
            condition: StepCondition::Always,
            constructor_args: no_args,
        }
    }

    const fn with_args(
        role: ContractRole,
        requires: &'static [ContractRole],
        constructor_args: ConstructorArgs,
    ) -> Self {
        Self {
            role,
            requires,
            requires_outside_arbitrum: &[],
            condition: StepCondition::Always,
            constructor_args,
        }
    }

    const fn with_reader(role: ContractRole, constructor_args: ConstructorArgs) -> Self {
        Self {
            requires_outside_arbitrum: &[ContractRole::Reader4844],
            ..Self::with_args(role, &[], constructor_args)
        }
    }

    /// Roles that must be deployed before this step runs on `parent`.
    pub fn requirements(&self, parent: ParentChain) -> impl Iterator<Item = ContractRole> + '_ {
        let conditional = if parent.is_arbitrum() {
            &[][..]
        } else {
            self.requires_outside_arbitrum
        };
        self.requires.iter().chain(conditional).copied()
    }
}

fn no_args(_: &StepContext<'_>) -> Result<Vec<u8>, DeploymentError> {
    Ok(Vec::new())
}

// Arbitrum parents get the zero reader.
fn sequencer_inbox_args(
    ctx: &StepContext<'_>,
    is_using_fee_token: bool,
) -> Result<Vec<u8>, DeploymentError> {
    let reader4844 = if ctx.parent.is_arbitrum() {
        Address::ZERO
    } else {
        ctx.address(ContractRole::Reader4844)?
    };
    Ok(SequencerInbox::constructorCall {
        maxDataSize: ctx.max_data_size.to_u256(),
        reader4844,
        isUsingFeeToken: is_using_fee_token,
    }
    .abi_encode())
}

fn eth_sequencer_inbox_args(ctx: &StepContext<'_>) -> Result<Vec<u8>, DeploymentError> {
    sequencer_inbox_args(ctx, false)
}

fn erc20_sequencer_inbox_args(ctx: &StepContext<'_>) -> Result<Vec<u8>, DeploymentError> {
    sequencer_inbox_args(ctx, true)
}

fn inbox_args(ctx: &StepContext<'_>) -> Result<Vec<u8>, DeploymentError> {
    Ok(Inbox::constructorCall {
        maxDataSize: ctx.max_data_size.to_u256(),
    }
    .abi_encode())
}

fn bridge_creator_args(ctx: &StepContext<'_>) -> Result<Vec<u8>, DeploymentError> {
    Ok(BridgeCreator::constructorCall {
        ethBasedTemplates: BridgeTemplates {
            bridge: ctx.address(ContractRole::EthBridge)?,
            sequencerInbox: ctx.address(ContractRole::EthSequencerInbox)?,
            inbox: ctx.address(ContractRole::EthInbox)?,
            rollupEventInbox: ctx.address(ContractRole::EthRollupEventInbox)?,
            outbox: ctx.address(ContractRole::EthOutbox)?,
        },
        erc20BasedTemplates: BridgeTemplates {
            bridge: ctx.address(ContractRole::Erc20Bridge)?,
            sequencerInbox: ctx.address(ContractRole::Erc20SequencerInbox)?,
            inbox: ctx.address(ContractRole::Erc20Inbox)?,
            rollupEventInbox: ctx.address(ContractRole::Erc20RollupEventInbox)?,
            outbox: ctx.address(ContractRole::Erc20Outbox)?,
        },
    }
    .abi_encode())
}

fn one_step_proof_entry_args(ctx: &StepContext<'_>) -> Result<Vec<u8>, DeploymentError> {
    Ok(OneStepProofEntry::constructorCall {
        prover0: ctx.address(ContractRole::OneStepProver0)?,
        proverMem: ctx.address(ContractRole::OneStepProverMemory)?,
        proverMath: ctx.address(ContractRole::OneStepProverMath)?,
        proverHostIo: ctx.address(ContractRole::OneStepProverHostIo)?,
    }
    .abi_encode())
}

const BRIDGE_TEMPLATE_ROLES: &[ContractRole] = &[
    ContractRole::EthBridge,
    ContractRole::EthSequencerInbox,
    ContractRole::EthInbox,
    ContractRole::EthRollupEventInbox,
    ContractRole::EthOutbox,
    ContractRole::Erc20Bridge,
    ContractRole::Erc20SequencerInbox,
    ContractRole::Erc20Inbox,
    ContractRole::Erc20RollupEventInbox,
    ContractRole::Erc20Outbox,
];

const PROVER_ROLES: &[ContractRole] = &[
    ContractRole::OneStepProver0,
    ContractRole::OneStepProverMemory,
    ContractRole::OneStepProverMath,
    ContractRole::OneStepProverHostIo,
];

/// Every contract of the system in dependency order: templates, proof
/// modules, logic, composites, auxiliary contracts.
pub const DEPLOYMENT_STEPS: &[DeploymentStep] = &[
    DeploymentStep {
        condition: StepCondition::ParentNotArbitrum,
        ..DeploymentStep::new(ContractRole::Reader4844)
    },
    DeploymentStep::new(ContractRole::EthBridge),
    DeploymentStep::with_reader(ContractRole::EthSequencerInbox, eth_sequencer_inbox_args),
    DeploymentStep::with_args(ContractRole::EthInbox, &[], inbox_args),
    DeploymentStep::new(ContractRole::EthRollupEventInbox),
    DeploymentStep::new(ContractRole::EthOutbox),
    DeploymentStep::new(ContractRole::Erc20Bridge),
    DeploymentStep::with_reader(ContractRole::Erc20SequencerInbox, erc20_sequencer_inbox_args),
    DeploymentStep::with_args(ContractRole::Erc20Inbox, &[], inbox_args),
    DeploymentStep::new(ContractRole::Erc20RollupEventInbox),
    DeploymentStep::new(ContractRole::Erc20Outbox),
    DeploymentStep::new(ContractRole::OneStepProver0),
    DeploymentStep::new(ContractRole::OneStepProverMemory),
    DeploymentStep::new(ContractRole::OneStepProverMath),
    DeploymentStep::new(ContractRole::OneStepProverHostIo),
    DeploymentStep::new(ContractRole::ChallengeManager),
    DeploymentStep::new(ContractRole::RollupAdminLogic),
    DeploymentStep::new(ContractRole::RollupUserLogic),
    DeploymentStep::with_args(
        ContractRole::BridgeCreator,
        BRIDGE_TEMPLATE_ROLES,
        bridge_creator_args,
    ),
    DeploymentStep::with_args(
        ContractRole::OneStepProofEntry,
        PROVER_ROLES,
        one_step_proof_entry_args,
    ),
    DeploymentStep::new(ContractRole::RollupCreator),
    DeploymentStep::new(ContractRole::UpgradeExecutor),
    DeploymentStep::new(ContractRole::ValidatorWalletCreator),
    DeploymentStep::new(ContractRole::DeployHelper),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_steps_are_in_dependency_order() {
        for parent in [ParentChain::Arbitrum, ParentChain::Other] {
            let mut seen = HashSet::new();
            for step in DEPLOYMENT_STEPS {
                if !step.condition.applies(parent) {
                    continue;
                }
                for dependency in step.requirements(parent) {
                    assert!(
                        seen.contains(&dependency),
                        "{} runs before its dependency {} on {}",
                        step.role,
                        dependency,
                        parent
                    );
                }
                assert!(seen.insert(step.role), "{} deployed twice", step.role);
            }
            let expected = if parent.is_arbitrum() { 23 } else { 24 };
            assert_eq!(seen.len(), expected);
        }
    }

    #[test]
    fn test_sequencer_inboxes_need_reader_outside_arbitrum() {
        for step in DEPLOYMENT_STEPS {
            let outside: Vec<_> = step.requirements(ParentChain::Other).collect();
            let on_arbitrum: Vec<_> = step.requirements(ParentChain::Arbitrum).collect();
            let needs_reader = matches!(
                step.role,
                ContractRole::EthSequencerInbox | ContractRole::Erc20SequencerInbox
            );
            assert_eq!(outside.contains(&ContractRole::Reader4844), needs_reader);
            assert!(!on_arbitrum.contains(&ContractRole::Reader4844));
        }
    }

    #[test]
    fn test_reader_only_outside_arbitrum() {
        let conditional: Vec<_> = DEPLOYMENT_STEPS
            .iter()
            .filter(|step| step.condition != StepCondition::Always)
            .map(|step| step.role)
            .collect();
        assert_eq!(conditional, vec![ContractRole::Reader4844]);
        assert!(StepCondition::ParentNotArbitrum.applies(ParentChain::Other));
        assert!(!StepCondition::ParentNotArbitrum.applies(ParentChain::Arbitrum));
    }

    #[test]
    fn test_composite_args_fail_without_inputs() {
        let deployed = DeployedContractSet::default();
        let ctx = StepContext {
            parent: ParentChain::Other,
            max_data_size: MaxDataSize::default(),
            deployed: &deployed,
        };
        assert!(matches!(
            bridge_creator_args(&ctx),
            Err(DeploymentError::MissingRole(ContractRole::EthBridge))
        ));
        assert!(matches!(
            one_step_proof_entry_args(&ctx),
            Err(DeploymentError::MissingRole(ContractRole::OneStepProver0))
        ));
        assert!(matches!(
            erc20_sequencer_inbox_args(&ctx),
            Err(DeploymentError::MissingRole(ContractRole::Reader4844))
        ));

        let on_arbitrum = StepContext {
            parent: ParentChain::Arbitrum,
            ..ctx
        };
        let encoded = eth_sequencer_inbox_args(&on_arbitrum).unwrap();
        assert_eq!(encoded.len(), 3 * 32);
        assert!(encoded[32..64].iter().all(|b| *b == 0));
    }
}
