//! 조립된 명령의 후처리 유스케이스.
//! 명령 출력/설명, 히스토리 기록, 실행·스크립트 저장·수정 메뉴를 담당한다.

use std::path::Path;

use anyhow::Result;
use tracing::warn;

use crate::application::ports::{
    ConfigRepository, HistoryStore, Prompter, Reporter, ScanLauncher, ScriptExporter,
};
use crate::application::usecases::build_command::default_artifact_name;
use crate::domain::command::{explain, split_command};
use crate::domain::history::HistoryEntry;
use crate::domain::target;

pub struct FinalizeCommandUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub history: &'a dyn HistoryStore,
    pub launcher: &'a dyn ScanLauncher,
    pub exporter: &'a dyn ScriptExporter,
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn Reporter,
}

impl FinalizeCommandUseCase<'_> {
    /// 명령을 보여주고 히스토리에 기록한 뒤 옵션 메뉴를 돈다.
    pub async fn execute(&self, command: String, target: String) -> Result<()> {
        let config = self.config_repo.load()?;
        let mut command = command;

        self.reporter.section("GENERATED NMAP COMMAND");
        self.reporter.raw(&command);

        self.print_explanation(&command);

        // 히스토리 기록 실패는 치명적이지 않다. 경고만 남긴다.
        if let Err(err) = self
            .history
            .append(HistoryEntry::new(&command, &target), config.history_limit())
        {
            warn!(error = %err, "failed to append command history");
            self.reporter
                .status("history", &format!("could not save history: {err:#}"));
        }

        loop {
            self.reporter.section("OPTIONS");
            self.reporter.raw("1. Execute scan now");
            self.reporter.raw("2. Save as bash script");
            self.reporter.raw("3. Modify command");
            self.reporter.raw("4. Return to menu");

            let Some(input) = self.prompter.line("Select option [1-4]: ")? else {
                return Ok(());
            };

            match input.trim() {
                "1" => self.execute_scan(&command, config.nmap_command()).await?,
                "2" => self.save_script(&command, &config.script_shell())?,
                "3" => {
                    if let Some(updated) = self.modify_command(&command)? {
                        command = updated;
                        self.reporter.status("command", "updated");
                        self.reporter.raw(&command);
                        self.print_explanation(&command);
                    }
                }
                "4" | "" => return Ok(()),
                other => self
                    .reporter
                    .raw(&format!("Invalid choice: {other}. Please select 1-4.")),
            }
        }
    }

    fn print_explanation(&self, command: &str) {
        self.reporter.section("COMMAND EXPLANATION");
        for (token, description) in explain(command) {
            self.reporter.raw(&format!("  {token:<18} - {description}"));
        }
    }

    async fn execute_scan(&self, command: &str, nmap_command: String) -> Result<()> {
        if !self.prompter.confirm("Execute this NMAP command now?")? {
            return Ok(());
        }

        let Some((program, args)) = split_command(command) else {
            self.reporter.status("scan", "nothing to execute");
            return Ok(());
        };
        // 설정이 다른 바이너리 경로를 가리키면 선두 토큰을 대체한다.
        let program = if program == "nmap" { nmap_command } else { program };

        self.reporter
            .status("scan", &format!("executing: {command}"));

        match self.launcher.launch(&program, &args).await {
            Ok(code) => self
                .reporter
                .status("scan", &format!("completed with exit code {code}")),
            Err(err) => self
                .reporter
                .status("scan", &format!("execution failed: {err:#}")),
        }
        Ok(())
    }

    fn save_script(&self, command: &str, shell: &str) -> Result<()> {
        let default_name = format!("{}.sh", default_artifact_name());
        let prompt = format!("Enter script filename (or Enter for '{default_name}'): ");

        let Some(input) = self.prompter.line(&prompt)? else {
            return Ok(());
        };

        let name = input.trim();
        let mut filename = if name.is_empty() {
            default_name
        } else {
            name.to_string()
        };
        if !filename.ends_with(".sh") {
            filename.push_str(".sh");
        }

        match self.exporter.export(Path::new(&filename), command, shell) {
            Ok(path) => {
                self.reporter
                    .status("script", &format!("saved as {}", path.display()));
                self.reporter
                    .status("script", &format!("run with: ./{filename}"));
            }
            Err(err) => self
                .reporter
                .status("script", &format!("could not save script: {err:#}")),
        }
        Ok(())
    }

    fn modify_command(&self, current: &str) -> Result<Option<String>> {
        self.reporter.raw(&format!("Current command: {current}"));
        let Some(input) = self.prompter.line("Enter modified command: ")? else {
            return Ok(None);
        };

        let updated = input.trim();
        if updated.is_empty() {
            return Ok(None);
        }
        if let Some(forbidden) = target::contains_shell_metacharacter(updated) {
            self.reporter.raw(&format!(
                "Command contains forbidden character '{forbidden}'; keeping the original."
            ));
            return Ok(None);
        }

        Ok(Some(updated.to_string()))
    }
}
