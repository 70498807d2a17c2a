use std::fmt;

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, Log, B256, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;

use crate::external_api::contract::error::BlockchainError;

use super::interface::{ChainInterface, DeployedContract, TxOutcome};

pub fn get_address_from_private_key(private_key: B256) -> Result<Address, BlockchainError> {
    let signer = get_signer(private_key)?;
    Ok(signer.address())
}

fn get_signer(private_key: B256) -> Result<PrivateKeySigner, BlockchainError> {
    PrivateKeySigner::from_bytes(&private_key)
        .map_err(|e| BlockchainError::ParseError(format!("Invalid private key: {e}")))
}

/// [`ChainInterface`] backed by an HTTP JSON-RPC node.
#[derive(Clone)]
pub struct AlloyChain {
    provider: DynProvider,
    signer_address: Address,
}

impl fmt::Debug for AlloyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlloyChain")
            .field("signer_address", &self.signer_address)
            .finish_non_exhaustive()
    }
}

impl AlloyChain {
    /// Connects to `rpc_url`. With a private key, transactions are signed
    /// locally; without one, they are sent from the node's first unlocked
    /// account.
    pub async fn connect(
        rpc_url: &str,
        private_key: Option<B256>,
    ) -> Result<Self, BlockchainError> {
        let url = rpc_url
            .parse()
            .map_err(|_| BlockchainError::ParseError("Failed to parse RPC_URL".to_string()))?;
        match private_key {
            Some(private_key) => {
                let signer = get_signer(private_key)?;
                let signer_address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_http(url)
                    .erased();
                Ok(Self {
                    provider,
                    signer_address,
                })
            }
            None => {
                let provider = ProviderBuilder::new().connect_http(url).erased();
                let accounts = provider
                    .get_accounts()
                    .await
                    .map_err(|e| BlockchainError::RPCError(format!("eth_accounts: {e}")))?;
                let signer_address = *accounts.first().ok_or(BlockchainError::NoSignerAccount)?;
                Ok(Self {
                    provider,
                    signer_address,
                })
            }
        }
    }

    async fn send_transaction(
        &self,
        name: &str,
        tx_request: TransactionRequest,
    ) -> Result<TransactionReceipt, BlockchainError> {
        let tx_request = tx_request.with_from(self.signer_address);
        let pending = self
            .provider
            .send_transaction(tx_request)
            .await
            .map_err(|e| send_error(name, self.signer_address, e))?;
        log::info!("{} tx hash: {:?}", name, pending.tx_hash());
        let receipt = pending.get_receipt().await.map_err(|e| {
            BlockchainError::RPCError(format!("Error awaiting {name} tx receipt: {e}"))
        })?;
        if !receipt.status() {
            return Err(BlockchainError::TransactionFailed(format!(
                "{} failed with tx hash: {:?}",
                name, receipt.transaction_hash
            )));
        }
        Ok(receipt)
    }
}

fn send_error(name: &str, from: Address, e: TransportError) -> BlockchainError {
    let error_message = e.to_string();
    log::error!("{}", error_message);
    match e {
        RpcError::ErrorResp(payload) if payload.message.contains("insufficient funds") => {
            BlockchainError::InsufficientFunds(format!(
                "Insufficient funds for {name} from {from:?}: {}",
                payload.message
            ))
        }
        RpcError::ErrorResp(payload) => BlockchainError::TransactionFailed(format!(
            "{name} rejected: {}",
            payload.message
        )),
        _ => BlockchainError::RPCError(format!("Error sending {name} tx: {error_message}")),
    }
}

#[async_trait]
impl ChainInterface for AlloyChain {
    fn signer_address(&self) -> Address {
        self.signer_address
    }

    async fn deploy(
        &self,
        name: &str,
        init_code: Bytes,
    ) -> Result<DeployedContract, BlockchainError> {
        let tx_request = TransactionRequest::default().with_deploy_code(init_code);
        let receipt = self.send_transaction(name, tx_request).await?;
        let address = receipt
            .contract_address
            .ok_or_else(|| BlockchainError::ContractAddressNotFound(name.to_string()))?;
        Ok(DeployedContract {
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn send(
        &self,
        name: &str,
        to: Address,
        calldata: Bytes,
        value: U256,
    ) -> Result<TxOutcome, BlockchainError> {
        let tx_request = TransactionRequest::default()
            .with_to(to)
            .with_input(calldata)
            .with_value(value);
        let receipt = self.send_transaction(name, tx_request).await?;
        let logs: Vec<Log> = receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect();
        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            logs,
        })
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, BlockchainError> {
        let tx_request = TransactionRequest::default().with_to(to).with_input(calldata);
        match self.provider.call(tx_request).await {
            Ok(data) => Ok(data),
            Err(RpcError::ErrorResp(payload)) => {
                Err(BlockchainError::CallReverted(payload.message.to_string()))
            }
            Err(e) => Err(BlockchainError::RPCError(format!("eth_call to {to:?}: {e}"))),
        }
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, BlockchainError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| BlockchainError::RPCError(format!("eth_getCode at {address:?}: {e}")))
    }
}
