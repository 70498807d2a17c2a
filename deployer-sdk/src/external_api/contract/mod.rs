use alloy::primitives::Bytes;

pub mod arb_sys;
pub mod artifacts;
pub mod erc20_contract;
pub mod error;
pub mod rollup_creator_contract;
pub mod template_contracts;

/// Creation bytecode followed by the ABI-encoded constructor arguments.
pub fn init_code(bytecode: &Bytes, constructor_args: &[u8]) -> Bytes {
    [bytecode.as_ref(), constructor_args].concat().into()
}
