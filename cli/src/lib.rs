pub mod chain;
pub mod create;
pub mod deploy;
pub mod env_var;
pub mod error;
