use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use alloy::primitives::{address, keccak256, Address, Bytes, Log, B256, U256};
use async_trait::async_trait;

use crate::external_api::contract::error::BlockchainError;

use super::interface::{ChainInterface, DeployedContract, TxOutcome};

/// anvil's first dev account.
pub const LOCAL_DEPLOYER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainRecord {
    Deploy {
        name: String,
        address: Address,
        init_code: Bytes,
    },
    Send {
        name: String,
        to: Address,
        calldata: Bytes,
        value: U256,
    },
}

/// Scripted answer to an `eth_call`.
#[derive(Debug, Clone)]
pub enum CallResponse {
    Data(Bytes),
    Revert(String),
    Unreachable(String),
}

/// In-memory [`ChainInterface`]: contract addresses follow the CREATE rule from
/// the signer's nonce, and every transaction is appended to a journal.
#[derive(Debug, Clone)]
pub struct LocalChain {
    signer: Address,
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    nonce: u64,
    block_number: u64,
    journal: Vec<ChainRecord>,
    code: HashMap<Address, Bytes>,
    call_responses: HashMap<Address, CallResponse>,
    failing: HashSet<String>,
    queued_logs: VecDeque<Vec<Log>>,
}

impl Default for LocalChain {
    fn default() -> Self {
        Self::new(LOCAL_DEPLOYER)
    }
}

impl LocalChain {
    pub fn new(signer: Address) -> Self {
        Self {
            signer,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_call_response(&self, to: Address, response: CallResponse) {
        self.state().call_responses.insert(to, response);
    }

    /// Makes every transaction named `name` revert.
    pub fn fail_on(&self, name: &str) {
        self.state().failing.insert(name.to_string());
    }

    /// Logs attached to the receipt of the next `send`.
    pub fn queue_logs(&self, logs: Vec<Log>) {
        self.state().queued_logs.push_back(logs);
    }

    pub fn journal(&self) -> Vec<ChainRecord> {
        self.state().journal.clone()
    }

    pub fn deployed_names(&self) -> Vec<String> {
        self.state()
            .journal
            .iter()
            .filter_map(|record| match record {
                ChainRecord::Deploy { name, .. } => Some(name.clone()),
                ChainRecord::Send { .. } => None,
            })
            .collect()
    }

    pub fn sends(&self) -> Vec<(String, Address, Bytes, U256)> {
        self.state()
            .journal
            .iter()
            .filter_map(|record| match record {
                ChainRecord::Send {
                    name,
                    to,
                    calldata,
                    value,
                } => Some((name.clone(), *to, calldata.clone(), *value)),
                ChainRecord::Deploy { .. } => None,
            })
            .collect()
    }

    fn next_tx(&self, state: &mut State, name: &str) -> Result<(u64, B256), BlockchainError> {
        let nonce = state.nonce;
        state.nonce += 1;
        state.block_number += 1;
        let tx_hash = keccak256([self.signer.as_slice(), &nonce.to_be_bytes()[..]].concat());
        if state.failing.contains(name) {
            return Err(BlockchainError::TransactionFailed(format!(
                "{name} failed with tx hash: {tx_hash:?}"
            )));
        }
        Ok((nonce, tx_hash))
    }
}

#[async_trait]
impl ChainInterface for LocalChain {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn deploy(
        &self,
        name: &str,
        init_code: Bytes,
    ) -> Result<DeployedContract, BlockchainError> {
        let mut state = self.state();
        let (nonce, tx_hash) = self.next_tx(&mut state, name)?;
        let address = self.signer.create(nonce);
        log::debug!("local deploy {name} at {address:?}");
        state.code.insert(address, init_code.clone());
        state.journal.push(ChainRecord::Deploy {
            name: name.to_string(),
            address,
            init_code,
        });
        Ok(DeployedContract { address, tx_hash })
    }

    async fn send(
        &self,
        name: &str,
        to: Address,
        calldata: Bytes,
        value: U256,
    ) -> Result<TxOutcome, BlockchainError> {
        let mut state = self.state();
        let (_, tx_hash) = self.next_tx(&mut state, name)?;
        state.journal.push(ChainRecord::Send {
            name: name.to_string(),
            to,
            calldata,
            value,
        });
        let logs = state.queued_logs.pop_front().unwrap_or_default();
        Ok(TxOutcome {
            tx_hash,
            block_number: Some(state.block_number),
            logs,
        })
    }

    async fn call(&self, to: Address, _calldata: Bytes) -> Result<Bytes, BlockchainError> {
        match self.state().call_responses.get(&to) {
            Some(CallResponse::Data(data)) => Ok(data.clone()),
            Some(CallResponse::Revert(reason)) => Err(BlockchainError::CallReverted(reason.clone())),
            Some(CallResponse::Unreachable(reason)) => Err(BlockchainError::RPCError(reason.clone())),
            // a call to an account without code succeeds with empty output
            None => Ok(Bytes::new()),
        }
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, BlockchainError> {
        Ok(self.state().code.get(&address).cloned().unwrap_or_default())
    }
}
