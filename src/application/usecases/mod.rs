//! 유스케이스 모음.

pub mod build_command;
pub mod check_nmap;
pub mod edit_config;
pub mod finalize_command;
pub mod inspect_config;
pub mod quick_template;
pub mod show_history;
