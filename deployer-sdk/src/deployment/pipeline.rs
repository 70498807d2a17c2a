use std::sync::Arc;

use alloy::primitives::{Address, Bytes};

use crate::{
    config::max_data_size::MaxDataSize,
    environment::{detect_parent_chain, ParentChain},
    external_api::{
        chain::interface::ChainInterface,
        contract::{
            artifacts::ArtifactStore, init_code, rollup_creator_contract::RollupCreatorContract,
        },
    },
};

use super::{
    error::DeploymentError,
    steps::{DeploymentStep, StepContext, DEPLOYMENT_STEPS},
    ContractRole, DeployedContractSet, FinalizedDeployment,
};

/// Sequential driver for the deployment steps. One transaction is in flight
/// at a time and each step starts only after the previous one is confirmed.
#[derive(Debug, Clone)]
pub struct DeploymentPipeline {
    chain: Arc<dyn ChainInterface>,
    artifacts: ArtifactStore,
}

impl DeploymentPipeline {
    pub fn new(chain: Arc<dyn ChainInterface>, artifacts: ArtifactStore) -> Self {
        Self { chain, artifacts }
    }

    pub async fn deploy_all(
        &self,
        max_data_size: MaxDataSize,
        verify: bool,
    ) -> Result<DeployedContractSet, DeploymentError> {
        let parent = detect_parent_chain(self.chain.as_ref()).await?;
        self.deploy_all_on(parent, max_data_size, verify).await
    }

    pub async fn deploy_all_on(
        &self,
        parent: ParentChain,
        max_data_size: MaxDataSize,
        verify: bool,
    ) -> Result<DeployedContractSet, DeploymentError> {
        self.run_steps(DEPLOYMENT_STEPS, parent, max_data_size, verify)
            .await
    }

    /// Runs `steps` in order. All bytecode is loaded up front so that a missing
    /// artifact fails the run before anything is sent.
    pub async fn run_steps(
        &self,
        steps: &[DeploymentStep],
        parent: ParentChain,
        max_data_size: MaxDataSize,
        verify: bool,
    ) -> Result<DeployedContractSet, DeploymentError> {
        let planned = steps
            .iter()
            .filter(|step| {
                let applies = step.condition.applies(parent);
                if !applies {
                    log::info!("Skipping {} (parent chain is {})", step.role, parent);
                }
                applies
            })
            .map(|step| -> Result<_, DeploymentError> {
                Ok((step, self.artifacts.bytecode(step.role.artifact())?))
            })
            .collect::<Result<Vec<(&DeploymentStep, Bytes)>, _>>()?;

        let mut deployed = DeployedContractSet::default();
        for (step, bytecode) in planned {
            if let Some(dependency) = step
                .requirements(parent)
                .find(|r| !deployed.contains(*r))
            {
                return Err(DeploymentError::MissingDependency {
                    step: step.role,
                    dependency,
                });
            }
            let args = (step.constructor_args)(&StepContext {
                parent,
                max_data_size,
                deployed: &deployed,
            })?;
            let contract = self
                .chain
                .deploy(step.role.as_str(), init_code(&bytecode, &args))
                .await?;
            log::info!(
                "{} deployed at {:?} (tx {:?})",
                step.role,
                contract.address,
                contract.tx_hash
            );
            if verify {
                self.verify_code(step.role, contract.address).await?;
            }
            deployed.insert(step.role, contract);
        }
        Ok(deployed)
    }

    async fn verify_code(
        &self,
        role: ContractRole,
        address: Address,
    ) -> Result<(), DeploymentError> {
        let code = self.chain.code_at(address).await?;
        if code.is_empty() {
            return Err(DeploymentError::NoCodeAtAddress { role, address });
        }
        log::debug!("{} has {} bytes of code", role, code.len());
        Ok(())
    }

    /// Registers the templates on the rollup creator. Takes the set by value:
    /// a set is finalized at most once.
    pub async fn set_templates(
        &self,
        deployed: DeployedContractSet,
    ) -> Result<FinalizedDeployment, DeploymentError> {
        let templates = deployed.templates()?;
        let rollup_creator = deployed.require(ContractRole::RollupCreator)?;
        log::info!("Waiting for the Template to be set on the Rollup Creator");
        let tx_hash = RollupCreatorContract::new(self.chain.clone(), rollup_creator)
            .set_templates(&templates)
            .await?;
        log::info!("Template is set on the Rollup Creator (tx {:?})", tx_hash);
        Ok(FinalizedDeployment {
            contracts: deployed,
            templates,
            rollup_creator,
            set_templates_tx_hash: tx_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::error::ConfigError,
        deployment::{deploy_rollup_contracts, DeploySettings},
        external_api::{
            chain::local::{CallResponse, ChainRecord, LocalChain},
            contract::{
                arb_sys::ARB_SYS_ADDRESS,
                rollup_creator_contract::RollupCreator,
            },
        },
    };
    use alloy::{primitives::U256, sol_types::SolCall};

    fn test_artifacts() -> ArtifactStore {
        DEPLOYMENT_STEPS
            .iter()
            .enumerate()
            .fold(ArtifactStore::default(), |store, (i, step)| {
                store.with_bytecode(step.role.artifact(), Bytes::from(vec![0x60, i as u8]))
            })
    }

    fn pipeline(chain: &LocalChain, artifacts: ArtifactStore) -> DeploymentPipeline {
        DeploymentPipeline::new(Arc::new(chain.clone()), artifacts)
    }

    fn arbitrum(chain: &LocalChain) {
        chain.set_call_response(
            ARB_SYS_ADDRESS,
            CallResponse::Data(Bytes::from(U256::from(31u64).to_be_bytes::<32>().to_vec())),
        );
    }

    fn settings(max_data_size: u64, ignore: bool) -> DeploySettings {
        DeploySettings {
            max_data_size: MaxDataSize(max_data_size),
            ignore_max_data_size_warning: ignore,
            verify: true,
        }
    }

    #[tokio::test]
    async fn test_deploys_every_role_then_sets_templates_once() {
        let chain = LocalChain::default();
        let finalized = deploy_rollup_contracts(
            Arc::new(chain.clone()),
            test_artifacts(),
            settings(117_964, false),
        )
        .await
        .unwrap();

        let expected: Vec<&str> = DEPLOYMENT_STEPS.iter().map(|s| s.role.as_str()).collect();
        assert_eq!(chain.deployed_names(), expected);
        assert_eq!(finalized.contracts.len(), 24);

        let sends = chain.sends();
        assert_eq!(sends.len(), 1);
        let (name, to, calldata, value) = &sends[0];
        assert_eq!(name, "setTemplates");
        assert_eq!(*to, finalized.rollup_creator);
        assert_eq!(*value, U256::ZERO);
        // finalization is the last transaction
        assert!(matches!(chain.journal().last(), Some(ChainRecord::Send { .. })));

        let call = RollupCreator::setTemplatesCall::abi_decode(calldata).unwrap();
        let contracts = &finalized.contracts;
        assert_eq!(Some(call.bridgeCreator), contracts.get(ContractRole::BridgeCreator));
        assert_eq!(Some(call.osp), contracts.get(ContractRole::OneStepProofEntry));
        assert_eq!(
            Some(call.challengeManagerLogic),
            contracts.get(ContractRole::ChallengeManager)
        );
        assert_eq!(Some(call.rollupAdminLogic), contracts.get(ContractRole::RollupAdminLogic));
        assert_eq!(Some(call.rollupUserLogic), contracts.get(ContractRole::RollupUserLogic));
        assert_eq!(
            Some(call.upgradeExecutorLogic),
            contracts.get(ContractRole::UpgradeExecutor)
        );
        assert_eq!(
            Some(call.validatorWalletCreator),
            contracts.get(ContractRole::ValidatorWalletCreator)
        );
        assert_eq!(Some(call.l2FactoriesDeployer), contracts.get(ContractRole::DeployHelper));
    }

    #[tokio::test]
    async fn test_failure_stops_pipeline_before_finalization() {
        let chain = LocalChain::default();
        chain.fail_on("OneStepProverMath");
        let err = deploy_rollup_contracts(
            Arc::new(chain.clone()),
            test_artifacts(),
            settings(117_964, false),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DeploymentError::Blockchain(_)));

        let names = chain.deployed_names();
        assert_eq!(names.last().map(String::as_str), Some("OneStepProverMemory"));
        assert!(!names.iter().any(|n| n == "ChallengeManager" || n == "RollupCreator"));
        assert!(chain.sends().is_empty());
    }

    #[tokio::test]
    async fn test_reader_skipped_on_arbitrum() {
        let chain = LocalChain::default();
        arbitrum(&chain);
        let deployed = pipeline(&chain, test_artifacts())
            .deploy_all(MaxDataSize(104_857), true)
            .await
            .unwrap();
        assert_eq!(deployed.len(), 23);
        assert_eq!(deployed.get(ContractRole::Reader4844), None);
        assert!(!chain.deployed_names().iter().any(|n| n == "Reader4844"));

        let ChainRecord::Deploy { init_code, .. } = &chain.journal()[1] else {
            panic!("expected a deployment");
        };
        let bytecode = test_artifacts().bytecode("SequencerInbox").unwrap();
        // (maxDataSize, reader4844, isUsingFeeToken)
        let args = &init_code[bytecode.len()..];
        assert_eq!(args.len(), 3 * 32);
        assert_eq!(U256::from_be_slice(&args[..32]), U256::from(104_857u64));
        assert_eq!(&args[44..64], Address::ZERO.as_slice());
        assert_eq!(U256::from_be_slice(&args[64..]), U256::ZERO);
    }

    #[tokio::test]
    async fn test_missing_artifact_sends_nothing() {
        let chain = LocalChain::default();
        let artifacts = DEPLOYMENT_STEPS
            .iter()
            .filter(|step| step.role != ContractRole::DeployHelper)
            .fold(ArtifactStore::default(), |store, step| {
                store.with_bytecode(step.role.artifact(), Bytes::from(vec![0x60]))
            });
        let err = pipeline(&chain, artifacts)
            .deploy_all(MaxDataSize::default(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, DeploymentError::Artifact(_)));
        assert!(chain.journal().is_empty());
    }

    #[tokio::test]
    async fn test_driver_refuses_unmet_dependencies() {
        let chain = LocalChain::default();
        let steps: Vec<DeploymentStep> = DEPLOYMENT_STEPS
            .iter()
            .filter(|step| step.role != ContractRole::OneStepProver0)
            .copied()
            .collect();
        let err = pipeline(&chain, test_artifacts())
            .run_steps(&steps, ParentChain::Other, MaxDataSize::default(), false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::MissingDependency {
                step: ContractRole::OneStepProofEntry,
                dependency: ContractRole::OneStepProver0,
            }
        ));
        assert!(!chain.deployed_names().iter().any(|n| n == "OneStepProofEntry"));
        assert!(chain.sends().is_empty());
    }

    #[tokio::test]
    async fn test_sequencer_inbox_needs_reader_outside_arbitrum() {
        let chain = LocalChain::default();
        let steps: Vec<DeploymentStep> = DEPLOYMENT_STEPS
            .iter()
            .filter(|step| step.role != ContractRole::Reader4844)
            .copied()
            .collect();
        let err = pipeline(&chain, test_artifacts())
            .run_steps(&steps, ParentChain::Other, MaxDataSize::default(), false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::MissingDependency {
                step: ContractRole::EthSequencerInbox,
                dependency: ContractRole::Reader4844,
            }
        ));
        assert_eq!(chain.deployed_names(), vec!["EthBridge".to_string()]);

        // the same table is complete on an Arbitrum parent
        let chain = LocalChain::default();
        let deployed = pipeline(&chain, test_artifacts())
            .run_steps(&steps, ParentChain::Arbitrum, MaxDataSize::default(), false)
            .await
            .unwrap();
        assert_eq!(deployed.len(), 23);
        assert!(!deployed.contains(ContractRole::Reader4844));
    }

    #[tokio::test]
    async fn test_set_templates_requires_every_template() {
        let chain = LocalChain::default();
        let pipeline = pipeline(&chain, test_artifacts());
        let steps: Vec<DeploymentStep> = DEPLOYMENT_STEPS
            .iter()
            .filter(|step| step.role != ContractRole::DeployHelper)
            .copied()
            .collect();
        let deployed = pipeline
            .run_steps(&steps, ParentChain::Other, MaxDataSize::default(), false)
            .await
            .unwrap();
        let err = pipeline.set_templates(deployed).await.unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::MissingRole(ContractRole::DeployHelper)
        ));
        assert!(chain.sends().is_empty());
    }

    #[tokio::test]
    async fn test_max_data_size_mismatch_is_fatal_for_both_families() {
        let chain = LocalChain::default();
        let err = deploy_rollup_contracts(
            Arc::new(chain.clone()),
            test_artifacts(),
            settings(104_857, false),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::Config(ConfigError::MaxDataSizeMismatch {
                expected: 117_964,
                ..
            })
        ));
        assert!(chain.journal().is_empty());

        let chain = LocalChain::default();
        arbitrum(&chain);
        let err = deploy_rollup_contracts(
            Arc::new(chain.clone()),
            test_artifacts(),
            settings(117_964, false),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::Config(ConfigError::MaxDataSizeMismatch {
                expected: 104_857,
                ..
            })
        ));
        assert!(chain.journal().is_empty());
    }

    #[tokio::test]
    async fn test_ignore_flag_skips_the_check() {
        let chain = LocalChain::default();
        let finalized = deploy_rollup_contracts(
            Arc::new(chain.clone()),
            test_artifacts(),
            settings(4_242, true),
        )
        .await
        .unwrap();
        assert_eq!(finalized.contracts.len(), 24);
        assert_eq!(chain.sends().len(), 1);
    }
}
