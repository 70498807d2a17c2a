use alloy::primitives::Address;

use super::{addresses::parse_optional_address, error::ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeTokenConfiguration {
    /// `None` means a fresh token has to be deployed before the rollup is created.
    pub fee_token: Option<Address>,
    pub fee_token_pricer: Address,
}

impl FeeTokenConfiguration {
    pub fn needs_deployment(&self) -> bool {
        self.fee_token.is_none()
    }
}

/// Resolves the fee token and its pricer from their raw environment values.
/// Unset or empty values are treated alike: the token is left to be deployed
/// and the pricer falls back to the zero address.
pub fn resolve_fee_token_config(
    fee_token: Option<&str>,
    fee_token_pricer: Option<&str>,
) -> Result<FeeTokenConfiguration, ConfigError> {
    let fee_token = parse_optional_address("Fee token address", fee_token)?;
    let fee_token_pricer = parse_optional_address("Fee token pricer address", fee_token_pricer)?
        .unwrap_or(Address::ZERO);
    Ok(FeeTokenConfiguration {
        fee_token,
        fee_token_pricer,
    })
}
