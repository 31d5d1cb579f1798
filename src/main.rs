//! `mapsmith` 바이너리 진입점.

use mapsmith::interface::cli::{AppComposition, Cli, CliAction};
use mapsmith::interface::cli::repl::run_repl;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    match action {
        CliAction::Interactive => {
            if let Err(err) = run_repl(&composition).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::ShowHistory => {
            if let Err(err) = composition.show_history_usecase().execute(false) {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
        CliAction::Build(target) => {
            if let Err(err) = run_build(&composition, target.as_deref()).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

async fn run_build(composition: &AppComposition, target: Option<&str>) -> anyhow::Result<()> {
    let Some(parts) = composition.build_command_usecase().execute(target)? else {
        return Ok(());
    };
    let command = parts.render();
    composition
        .finalize_command_usecase()
        .execute(command, parts.target)
        .await
}
