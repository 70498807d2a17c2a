pub mod chain;
pub mod contract;
