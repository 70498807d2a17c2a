use alloy::{
    primitives::{address, Address},
    sol,
};

/// The ArbSys precompile, present on every Arbitrum chain.
pub const ARB_SYS_ADDRESS: Address = address!("0000000000000000000000000000000000000064");

sol! {
    interface ArbSys {
        function arbOSVersion() external view returns (uint256);
    }
}
