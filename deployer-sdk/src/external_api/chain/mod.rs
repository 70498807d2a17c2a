pub mod alloy_chain;
pub mod interface;
pub mod local;
