use alloy::primitives::Address;
use rollup_deployer_sdk::{
    deployment::{deploy_rollup_contracts, ContractRole, DeploySettings},
    environment::detect_parent_chain,
    rollup_creation::{create_rollup, CreateRollupParams},
};
use tests::{connect, load_env};

#[tokio::test]
#[ignore]
async fn deploy_contracts_and_create_rollup() -> anyhow::Result<()> {
    let env = load_env()?;
    let (chain, artifacts) = connect(&env).await?;

    let parent = detect_parent_chain(chain.as_ref()).await?;
    let finalized = deploy_rollup_contracts(
        chain.clone(),
        artifacts.clone(),
        DeploySettings {
            max_data_size: parent.expected_max_data_size(),
            ignore_max_data_size_warning: false,
            verify: true,
        },
    )
    .await?;
    for (role, contract) in finalized.contracts.iter() {
        println!("{role}: {:?}", contract.address);
    }
    assert_eq!(
        finalized.contracts.get(ContractRole::RollupCreator),
        Some(finalized.rollup_creator)
    );

    let params = CreateRollupParams {
        is_development: true,
        rollup_creator: Some(finalized.rollup_creator.to_string()),
        stake_token: Some(Address::ZERO.to_string()),
        max_data_size: parent.expected_max_data_size(),
        ..Default::default()
    };
    let handle = create_rollup(chain.clone(), &artifacts, &params).await?;
    println!("Rollup address: {:?}", handle.rollup);
    assert!(handle.fee_token_deployed);
    assert!(!chain.code_at(handle.rollup).await?.is_empty());
    Ok(())
}
