pub mod config;
pub mod deployment;
pub mod environment;
pub mod external_api;
pub mod rollup_creation;
