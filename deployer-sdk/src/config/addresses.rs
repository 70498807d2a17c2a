use std::str::FromStr as _;

use alloy::primitives::Address;

use super::error::ConfigError;

/// Parses a 20-byte hex address, with or without the `0x` prefix.
///
/// Mixed-case input must carry a valid EIP-55 checksum; all-lowercase and
/// all-uppercase input is accepted as is.
pub fn parse_address(name: &'static str, value: &str) -> Result<Address, ConfigError> {
    let invalid = || ConfigError::InvalidAddress {
        name,
        value: value.to_string(),
    };
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let prefixed = format!("0x{hex}");
        return Address::parse_checksummed(&prefixed, None).map_err(|_| invalid());
    }
    Address::from_str(hex).map_err(|_| invalid())
}

/// Like [`parse_address`], but an unset or empty value resolves to `None`.
pub fn parse_optional_address(
    name: &'static str,
    value: Option<&str>,
) -> Result<Option<Address>, ConfigError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_address(name, v).map(Some),
        None => Ok(None),
    }
}

/// Parses a comma-separated address list. An unset or empty value gives an empty list.
pub fn parse_address_list(
    name: &'static str,
    value: Option<&str>,
) -> Result<Vec<Address>, ConfigError> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse_address(name, v))
        .collect()
}
