#[derive(Debug, thiserror::Error)]
pub enum BlockchainError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("RPC error: {0}")]
    RPCError(String),

    #[error("Call reverted: {0}")]
    CallReverted(String),

    #[error("Contract address not found in receipt of {0}")]
    ContractAddressNotFound(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("No account available to send transactions from")]
    NoSignerAccount,

    #[error("Parse error: {0}")]
    ParseError(String),
}
