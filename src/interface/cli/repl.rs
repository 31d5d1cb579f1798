//! `mapsmith` 대화형 쉘(REPL) 인터페이스.

use std::io::{self, IsTerminal, Write};
use std::process::Command;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::catalog::{
    DETECTION_OPTIONS, MISC_OPTIONS, OUTPUT_FORMATS, QUICK_TEMPLATES, SCAN_TYPES,
    TIMING_TEMPLATES,
};
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::repl_input::read_repl_input;

/// 대화형 입력으로 `/command`를 처리한다.
pub async fn run_repl(composition: &AppComposition) -> Result<()> {
    print_welcome(composition).await;
    io::stdout().flush()?;
    let mut next_prefill: Option<String> = None;

    loop {
        let prefill = next_prefill.take();
        let Some(raw_input) = read_repl_input(prefill.as_deref())? else {
            println!();
            break;
        };
        let input = raw_input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_repl_command(input) {
            Ok(ReplCommand::Exit) => break,
            Ok(ReplCommand::QuickNeedsArgs) => {
                // 인자가 빠진 `/quick`은 별도 프롬프트 없이 입력창에 재프리필한다.
                next_prefill = Some("/quick ".to_string());
            }
            Ok(cmd) => {
                if let Err(err) = execute_command(composition, cmd).await {
                    eprintln!("error: {err:#}");
                }
            }
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("hint: start typing / for command suggestions");
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    InspectConfig,
    EditConfig,
    /// 7단계 마법사. 대상이 주어지면 대상 단계를 건너뛴다.
    Build(Option<String>),
    /// `/quick`만 입력된 상태. 다음 입력 라운드에 `/quick `을 프리필한다.
    QuickNeedsArgs,
    Quick {
        index: Option<usize>,
        target: Option<String>,
    },
    History,
    Help,
}

async fn execute_command(composition: &AppComposition, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Exit | ReplCommand::QuickNeedsArgs => Ok(()),
        ReplCommand::InspectConfig => {
            let json = composition.inspect_config_usecase().execute()?;
            println!("{json}");
            Ok(())
        }
        ReplCommand::EditConfig => {
            let path = composition.edit_config_usecase().execute()?;
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

            // 에디터가 정상 동작하도록 raw mode를 해제한다.
            let _ = crossterm::terminal::disable_raw_mode();
            let status = Command::new(&editor)
                .arg(&path)
                .status()
                .with_context(|| format!("failed to launch editor: {editor}"))?;
            let _ = crossterm::terminal::enable_raw_mode();

            if status.success() {
                println!("config saved: {}", path.display());
            } else {
                eprintln!("editor exited with: {status}");
            }
            Ok(())
        }
        ReplCommand::Build(target) => {
            let Some(parts) = composition
                .build_command_usecase()
                .execute(target.as_deref())?
            else {
                return Ok(());
            };
            let command = parts.render();
            composition
                .finalize_command_usecase()
                .execute(command, parts.target)
                .await
        }
        ReplCommand::Quick { index, target } => {
            let Some((command, target)) = composition
                .quick_template_usecase()
                .execute(index, target.as_deref())?
            else {
                return Ok(());
            };
            composition
                .finalize_command_usecase()
                .execute(command, target)
                .await
        }
        ReplCommand::History => {
            let Some(entry) = composition.show_history_usecase().execute(true)? else {
                return Ok(());
            };
            composition
                .finalize_command_usecase()
                .execute(entry.command, entry.target)
                .await
        }
        ReplCommand::Help => {
            print_reference();
            Ok(())
        }
    }
}

fn parse_repl_command(input: &str) -> Result<ReplCommand, String> {
    if !input.starts_with('/') {
        return Err("slash command only. example: /build 192.168.1.1".to_string());
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return Err("empty command".to_string());
    }

    match parts[0] {
        "/exit" | "/quit" => Ok(ReplCommand::Exit),
        "/help" => Ok(ReplCommand::Help),
        "/history" => Ok(ReplCommand::History),
        "/config" => {
            if parts.len() == 1 {
                return Ok(ReplCommand::InspectConfig);
            }
            if parts.len() == 2 && parts[1] == "edit" {
                return Ok(ReplCommand::EditConfig);
            }
            Err("usage: /config [edit]".to_string())
        }
        "/build" => match parts.len() {
            1 => Ok(ReplCommand::Build(None)),
            2 => Ok(ReplCommand::Build(Some(parts[1].to_string()))),
            _ => Err("usage: /build [target]".to_string()),
        },
        "/quick" => {
            if parts.len() == 1 {
                return Ok(ReplCommand::QuickNeedsArgs);
            }
            parse_quick_command(&parts[1..])
        }
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_quick_command(args: &[&str]) -> Result<ReplCommand, String> {
    if args.len() > 2 {
        return Err("usage: /quick [template 1-8] [target]".to_string());
    }

    let mut index: Option<usize> = None;
    let mut target: Option<String> = None;

    for arg in args {
        if index.is_none() && target.is_none()
            && let Ok(n) = arg.parse::<usize>()
        {
            if !(1..=QUICK_TEMPLATES.len()).contains(&n) {
                return Err(format!(
                    "template must be 1-{}, got {n}",
                    QUICK_TEMPLATES.len()
                ));
            }
            index = Some(n);
            continue;
        }

        if target.is_some() {
            return Err("usage: /quick [template 1-8] [target]".to_string());
        }
        target = Some((*arg).to_string());
    }

    Ok(ReplCommand::Quick { index, target })
}

async fn print_welcome(composition: &AppComposition) {
    let interactive = io::stdout().is_terminal();
    if interactive {
        // 대화형 터미널에서는 시작 화면을 지우고 배너를 출력한다.
        print!("\x1b[2J\x1b[H");
    }

    let title = paint("mapsmith interactive shell", "1;36", interactive);
    let subtitle = paint("NMAP command builder", "2;37", interactive);
    let cmd_palette = paint("/", "1;33", interactive);
    let cmd_build = paint("/build [target]", "1;32", interactive);
    let cmd_quick = paint("/quick [template 1-8] [target]", "1;35", interactive);
    let cmd_exit = paint("/exit", "1;31", interactive);

    println!("+------------------------------------------------------------+");
    println!("| {:<58} |", title);
    println!("| {:<58} |", subtitle);
    println!("+------------------------------------------------------------+");
    println!("| Status Dashboard                                            |");
    for line in build_startup_dashboard_lines(composition).await {
        println!("| {:<58} |", fit_box_line(&line, 58));
    }
    println!("+------------------------------------------------------------+");
    println!("| Quick start                                                 |");
    println!("|  0) {:<54} |", cmd_palette);
    println!("|  1) {:<54} |", cmd_build);
    println!("|  2) {:<54} |", cmd_quick);
    println!("|  3) {:<54} |", cmd_exit);
    println!("+------------------------------------------------------------+");
    println!();
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

async fn build_startup_dashboard_lines(composition: &AppComposition) -> Vec<String> {
    let mut lines = Vec::new();

    let inspection_json = match composition.inspect_config_usecase().execute() {
        Ok(raw) => raw,
        Err(err) => {
            lines.push("Config: error".to_string());
            lines.push(format!("detail: {err}"));
            lines.push("hint: run `/config` to inspect and fix".to_string());
            return lines;
        }
    };

    match serde_json::from_str::<Value>(&inspection_json) {
        Ok(value) => {
            let loaded_count = value
                .get("loaded_paths")
                .and_then(|v| v.as_array())
                .map(|arr| arr.len())
                .unwrap_or(0);
            lines.push(format!("Config: ok (loaded files: {loaded_count})"));

            let history_limit = value
                .pointer("/effective_defaults/history_limit")
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            let history_path = value
                .pointer("/effective_defaults/history_path")
                .and_then(|v| v.as_str())
                .unwrap_or("not set");
            lines.push(format!("History: keep {history_limit} at {history_path}"));
        }
        Err(_) => {
            lines.push("Config: loaded (dashboard parse fallback)".to_string());
            lines.push("hint: run `/config` to inspect details".to_string());
        }
    }

    match composition.check_nmap_usecase().execute().await {
        Ok(probe) => match probe.version {
            Some(version) => lines.push(format!("Nmap: {version}")),
            None => {
                lines.push(format!("Nmap: `{}` not found", probe.command));
                for hint in crate::application::usecases::check_nmap::NmapProbe::install_hints() {
                    lines.push(format!("  {hint}"));
                }
            }
        },
        Err(err) => lines.push(format!("Nmap: probe failed ({err})")),
    }

    lines
}

fn print_reference() {
    println!();
    println!("NMAP QUICK REFERENCE");
    println!();
    println!("Scan types:");
    for entry in SCAN_TYPES {
        println!("  {:<6} {:<22} {}", entry.flag, entry.name, entry.description);
    }
    println!();
    println!("Timing templates:");
    for entry in TIMING_TEMPLATES {
        println!("  {:<6} {:<22} {}", entry.flag, entry.name, entry.description);
    }
    println!();
    println!("Detection options:");
    for entry in DETECTION_OPTIONS {
        println!("  {:<22} {:<22} {}", entry.flag, entry.name, entry.description);
    }
    println!();
    println!("Output formats:");
    for format in OUTPUT_FORMATS {
        println!("  {:<6} {}", format.flag, format.name);
    }
    println!();
    println!("Common options:");
    for (flag, description) in MISC_OPTIONS {
        println!("  {flag:<10} {description}");
    }
    println!();
    println!("Quick templates:");
    for (idx, template) in QUICK_TEMPLATES.iter().enumerate() {
        println!("  {}. {:<22} {}", idx + 1, template.name, template.description);
    }
    println!();
}

fn fit_box_line(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }

    if width <= 3 {
        return ".".repeat(width);
    }

    let keep = width - 3;
    let head: String = chars.into_iter().take(keep).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_is_required() {
        assert!(parse_repl_command("build").is_err());
    }

    #[test]
    fn build_accepts_optional_target() {
        assert_eq!(
            parse_repl_command("/build").unwrap(),
            ReplCommand::Build(None)
        );
        assert_eq!(
            parse_repl_command("/build 10.0.0.1").unwrap(),
            ReplCommand::Build(Some("10.0.0.1".to_string()))
        );
        assert!(parse_repl_command("/build a b").is_err());
    }

    #[test]
    fn bare_quick_prefills_args() {
        assert_eq!(
            parse_repl_command("/quick").unwrap(),
            ReplCommand::QuickNeedsArgs
        );
    }

    #[test]
    fn quick_parses_index_and_target() {
        assert_eq!(
            parse_repl_command("/quick 3 example.com").unwrap(),
            ReplCommand::Quick {
                index: Some(3),
                target: Some("example.com".to_string()),
            }
        );
        assert_eq!(
            parse_repl_command("/quick example.com").unwrap(),
            ReplCommand::Quick {
                index: None,
                target: Some("example.com".to_string()),
            }
        );
        assert!(parse_repl_command("/quick 99 host").is_err());
    }

    #[test]
    fn config_subcommands() {
        assert_eq!(
            parse_repl_command("/config").unwrap(),
            ReplCommand::InspectConfig
        );
        assert_eq!(
            parse_repl_command("/config edit").unwrap(),
            ReplCommand::EditConfig
        );
        assert!(parse_repl_command("/config nope").is_err());
    }

    #[test]
    fn exit_aliases() {
        assert_eq!(parse_repl_command("/exit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("/quit").unwrap(), ReplCommand::Exit);
    }
}
