//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mapsmith")]
#[command(about = "Interactive NMAP command builder")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Scan target (IP, range, CIDR, hostname, or -iL file)
    target: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and nmap availability
    Config,
    /// Show recent command history
    History,
}

pub enum CliAction {
    Interactive,
    InspectConfig,
    ShowHistory,
    /// 대상이 주어지면 마법사의 대상 단계를 건너뛴다.
    Build(Option<String>),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        let cli = Cli::parse();

        match cli.command {
            Some(Commands::Config) => Ok(CliAction::InspectConfig),
            Some(Commands::History) => Ok(CliAction::ShowHistory),
            None => match cli.target {
                Some(target) => Ok(CliAction::Build(Some(target))),
                None => Ok(CliAction::Interactive),
            },
        }
    }
}
