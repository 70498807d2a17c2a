use colored::Colorize as _;
use rollup_deployer_sdk::{
    config::max_data_size::resolve_max_data_size,
    deployment::{deploy_rollup_contracts, DeploySettings, FinalizedDeployment},
    external_api::contract::artifacts::ArtifactStore,
};

use crate::{chain::connect, env_var::EnvVar, error::CliError};

/// Deploys every template contract and registers them on the rollup creator.
pub async fn deploy(env: &EnvVar) -> Result<FinalizedDeployment, CliError> {
    let settings = DeploySettings {
        max_data_size: resolve_max_data_size(env.max_data_size),
        ignore_max_data_size_warning: env.ignore_max_data_size_warning(),
        verify: env.verify_deployment,
    };
    let artifacts = ArtifactStore::open(&env.artifacts_dir)?;
    let chain = connect(env, env.dry_run).await?;
    let finalized = deploy_rollup_contracts(chain, artifacts, settings).await?;
    print_summary(&finalized);
    Ok(finalized)
}

pub fn print_summary(finalized: &FinalizedDeployment) {
    println!("{}", "Deployed contracts".bold());
    for (role, contract) in finalized.contracts.iter() {
        println!("  {:<24} {:?}", role.to_string(), contract.address);
    }
    println!(
        "Templates set on RollupCreator {:?} in tx {:?}",
        finalized.rollup_creator, finalized.set_templates_tx_hash
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollup_deployer_sdk::deployment::{steps::DEPLOYMENT_STEPS, ContractRole};
    use std::fs;

    fn env_with(artifacts_dir: &std::path::Path, extra: &[(&str, &str)]) -> EnvVar {
        let mut vars = vec![
            ("DRY_RUN".to_string(), "true".to_string()),
            (
                "ARTIFACTS_DIR".to_string(),
                artifacts_dir.to_string_lossy().to_string(),
            ),
        ];
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        envy::from_iter(vars).unwrap()
    }

    fn write_artifacts(dir: &std::path::Path) {
        for step in DEPLOYMENT_STEPS {
            let name = step.role.artifact();
            let file = dir.join(format!("{name}.sol")).join(format!("{name}.json"));
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, r#"{"abi":[],"bytecode":"0x6080604052"}"#).unwrap();
        }
    }

    #[tokio::test]
    async fn test_dry_run_deploys_from_artifacts_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        let finalized = deploy(&env_with(dir.path(), &[])).await.unwrap();
        assert_eq!(finalized.contracts.len(), DEPLOYMENT_STEPS.len());
        assert_eq!(
            finalized.contracts.get(ContractRole::RollupCreator),
            Some(finalized.rollup_creator)
        );
    }

    #[tokio::test]
    async fn test_dry_run_rejects_mismatched_max_data_size() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        let err = deploy(&env_with(dir.path(), &[("MAX_DATA_SIZE", "104857")]))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Deployment failed: Config error: maxDataSize should be 117964 when the parent chain is not Arbitrum (set IGNORE_MAX_DATA_SIZE_WARNING to ignore), got 104857"
        );

        let finalized = deploy(&env_with(
            dir.path(),
            &[
                ("MAX_DATA_SIZE", "104857"),
                ("IGNORE_MAX_DATA_SIZE_WARNING", "true"),
            ],
        ))
        .await
        .unwrap();
        assert_eq!(finalized.contracts.len(), DEPLOYMENT_STEPS.len());
    }
}
