//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod json_file_adapter;
#[cfg(feature = "sqlite")]
pub mod sqlite_adapter;
pub mod stub_link_adapter;
#[cfg(feature = "web")]
pub mod web;
