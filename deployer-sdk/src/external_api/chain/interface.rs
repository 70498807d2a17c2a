use std::fmt::Debug;

use alloy::primitives::{Address, Bytes, Log, B256, U256};
use async_trait::async_trait;

use crate::external_api::contract::error::BlockchainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: B256,
}

/// Confirmed result of a state-changing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub logs: Vec<Log>,
}

/// The single connection through which every transaction is submitted.
///
/// Each state-changing method returns only once the transaction is confirmed,
/// and a reverted transaction is reported as an error.
#[async_trait]
pub trait ChainInterface: Debug + Send + Sync {
    /// Account the transactions are sent from.
    fn signer_address(&self) -> Address;

    /// Sends a contract-creation transaction with `init_code` (bytecode followed
    /// by the ABI-encoded constructor arguments).
    async fn deploy(&self, name: &str, init_code: Bytes)
        -> Result<DeployedContract, BlockchainError>;

    async fn send(
        &self,
        name: &str,
        to: Address,
        calldata: Bytes,
        value: U256,
    ) -> Result<TxOutcome, BlockchainError>;

    /// Read-only `eth_call` against the latest block.
    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, BlockchainError>;

    async fn code_at(&self, address: Address) -> Result<Bytes, BlockchainError>;
}
