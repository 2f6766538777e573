//! Concrete implementations of the port traits.

pub mod file_config_adapter;
pub mod json_report_adapter;
pub mod stooq_adapter;
