//! CLI command implementations.
//!
//! Available commands:
//! - **check**: Check Ruby files for conversion calls that drop arguments
//! - **init**: Initialize a new enumguard configuration file

pub mod check;
pub mod init;

pub use check::{check_project, run_check, CheckConfig};
pub use init::init_config;
