//! Port traits the domain depends on.

pub mod config_port;
pub mod export_port;
pub mod link_port;
pub mod snapshot_port;
