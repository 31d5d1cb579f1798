//! CLI 인터페이스 모듈.

pub mod command;
pub mod composition;
pub mod repl;
pub mod repl_input;

pub use command::{Cli, CliAction};
pub use composition::AppComposition;
