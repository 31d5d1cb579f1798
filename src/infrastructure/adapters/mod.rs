//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod history_repository;
mod nmap_launcher;
mod reporter;
mod script_exporter;
mod stdin_prompter;

pub use config_repository::JsonConfigRepository;
pub use history_repository::JsonHistoryStore;
pub use nmap_launcher::NmapLauncher;
pub use reporter::ConsoleReporter;
pub use script_exporter::BashScriptExporter;
pub use stdin_prompter::StdinPrompter;
