use std::sync::Arc;

use alloy::{
    primitives::{utils::Unit, Address, Bytes, B256, U256},
    sol,
    sol_types::{SolCall as _, SolConstructor as _},
};

use crate::external_api::chain::interface::{ChainInterface, DeployedContract};

use super::{error::BlockchainError, init_code};

pub const TEST_TOKEN_ARTIFACT: &str = "TestToken";

sol! {
    contract TestToken {
        constructor(uint256 initialSupply);
    }

    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

/// Supply minted to the deployer when a fee token has to be created: one
/// billion whole tokens.
pub fn default_fee_token_supply() -> U256 {
    Unit::ETHER.wei() * U256::from(1_000_000_000u64)
}

#[derive(Debug, Clone)]
pub struct ERC20Contract {
    pub chain: Arc<dyn ChainInterface>,
    pub address: Address,
}

impl ERC20Contract {
    pub fn new(chain: Arc<dyn ChainInterface>, address: Address) -> Self {
        Self { chain, address }
    }

    /// Deploys a `TestToken` minting `initial_supply` to the signer.
    pub async fn deploy(
        chain: Arc<dyn ChainInterface>,
        bytecode: &Bytes,
        initial_supply: U256,
    ) -> Result<(Self, DeployedContract), BlockchainError> {
        let args = TestToken::constructorCall {
            initialSupply: initial_supply,
        }
        .abi_encode();
        let deployed = chain
            .deploy(TEST_TOKEN_ARTIFACT, init_code(bytecode, &args))
            .await?;
        log::info!("{} deployed at {:?}", TEST_TOKEN_ARTIFACT, deployed.address);
        Ok((Self::new(chain, deployed.address), deployed))
    }

    pub async fn approve(&self, spender: Address, amount: U256) -> Result<B256, BlockchainError> {
        let calldata = IERC20::approveCall { spender, amount }.abi_encode();
        let outcome = self
            .chain
            .send("approve", self.address, calldata.into(), U256::ZERO)
            .await?;
        Ok(outcome.tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::utils::parse_ether, sol_types::SolCall};
    use crate::external_api::chain::local::{ChainRecord, LocalChain, LOCAL_DEPLOYER};

    #[tokio::test]
    async fn test_deploy_encodes_supply_after_bytecode() {
        let chain = LocalChain::default();
        let bytecode = Bytes::from(vec![0x60, 0x80]);
        let (token, _) = ERC20Contract::deploy(
            Arc::new(chain.clone()),
            &bytecode,
            default_fee_token_supply(),
        )
        .await
        .unwrap();
        assert_eq!(token.address, LOCAL_DEPLOYER.create(0));

        let ChainRecord::Deploy { name, init_code, .. } = &chain.journal()[0] else {
            panic!("expected a deployment");
        };
        assert_eq!(name, TEST_TOKEN_ARTIFACT);
        assert_eq!(&init_code[..2], &[0x60, 0x80]);
        let supply = U256::from_be_slice(&init_code[2..]);
        assert_eq!(supply, parse_ether("1000000000").unwrap());
    }

    #[tokio::test]
    async fn test_approve_sends_to_token() {
        let chain = LocalChain::default();
        let token = ERC20Contract::new(Arc::new(chain.clone()), Address::repeat_byte(7));
        token
            .approve(Address::repeat_byte(8), U256::from(5u64))
            .await
            .unwrap();
        let sends = chain.sends();
        assert_eq!(sends.len(), 1);
        let (name, to, calldata, _) = &sends[0];
        assert_eq!(name, "approve");
        assert_eq!(*to, Address::repeat_byte(7));
        let decoded = IERC20::approveCall::abi_decode(calldata).unwrap();
        assert_eq!(decoded.spender, Address::repeat_byte(8));
        assert_eq!(decoded.amount, U256::from(5u64));
    }
}
