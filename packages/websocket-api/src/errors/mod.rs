pub mod action_errors;
pub mod config_errors;
pub mod connection_errors;
