use crate::environment::ParentChain;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingAddress(&'static str),

    #[error("{name} {value} is not a valid address!")]
    InvalidAddress { name: &'static str, value: String },

    #[error(
        "maxDataSize should be {expected} when the parent chain is {parent} (set IGNORE_MAX_DATA_SIZE_WARNING to ignore), got {actual}"
    )]
    MaxDataSizeMismatch {
        parent: ParentChain,
        expected: u64,
        actual: u64,
    },

    #[error("Invalid chain config: {0}")]
    InvalidChainConfig(String),

    #[error("Inconsistent rollup config: {0}")]
    InconsistentRollupConfig(String),
}
