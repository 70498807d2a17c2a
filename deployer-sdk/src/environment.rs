use std::fmt;

use alloy::sol_types::SolCall as _;

use crate::{
    config::{
        error::ConfigError,
        max_data_size::{MaxDataSize, ARBITRUM_PARENT_MAX_DATA_SIZE, NON_ARBITRUM_PARENT_MAX_DATA_SIZE},
    },
    external_api::{
        chain::interface::ChainInterface,
        contract::{
            arb_sys::{ArbSys, ARB_SYS_ADDRESS},
            error::BlockchainError,
        },
    },
};

/// Family of the chain the contracts are deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentChain {
    Arbitrum,
    Other,
}

impl ParentChain {
    pub fn is_arbitrum(self) -> bool {
        matches!(self, Self::Arbitrum)
    }

    pub fn expected_max_data_size(self) -> MaxDataSize {
        match self {
            Self::Arbitrum => MaxDataSize(ARBITRUM_PARENT_MAX_DATA_SIZE),
            Self::Other => MaxDataSize(NON_ARBITRUM_PARENT_MAX_DATA_SIZE),
        }
    }
}

impl fmt::Display for ParentChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arbitrum => write!(f, "Arbitrum"),
            Self::Other => write!(f, "not Arbitrum"),
        }
    }
}

/// Probes the ArbSys precompile. A chain without it either reverts the call or
/// answers with empty output; a connection failure is returned as is.
pub async fn detect_parent_chain(
    chain: &dyn ChainInterface,
) -> Result<ParentChain, BlockchainError> {
    let calldata = ArbSys::arbOSVersionCall {}.abi_encode();
    let parent = match chain.call(ARB_SYS_ADDRESS, calldata.into()).await {
        Ok(output) => match ArbSys::arbOSVersionCall::abi_decode_returns(&output) {
            Ok(version) => {
                log::info!("Parent chain is Arbitrum (ArbOS version {version})");
                ParentChain::Arbitrum
            }
            Err(_) => ParentChain::Other,
        },
        Err(BlockchainError::CallReverted(reason)) => {
            log::debug!("arbOSVersion reverted: {reason}");
            ParentChain::Other
        }
        Err(e) => return Err(e),
    };
    if !parent.is_arbitrum() {
        log::info!("Parent chain is not Arbitrum");
    }
    Ok(parent)
}

/// Fails when `max_data_size` is not the value expected for `parent`.
pub fn validate_max_data_size(
    parent: ParentChain,
    max_data_size: MaxDataSize,
) -> Result<(), ConfigError> {
    let expected = parent.expected_max_data_size();
    if max_data_size != expected {
        return Err(ConfigError::MaxDataSizeMismatch {
            parent,
            expected: expected.get(),
            actual: max_data_size.get(),
        });
    }
    Ok(())
}
