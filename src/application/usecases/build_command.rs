//! 7단계 대화형 마법사로 nmap 명령을 조립하는 유스케이스.
//! 모든 입력은 `Prompter` 포트를 거치므로 TTY 없이도 테스트할 수 있다.

use anyhow::Result;

use crate::application::ports::{ConfigRepository, Prompter, Reporter};
use crate::domain::catalog::{
    self, CUSTOM_SCRIPT_CHOICE, DETECTION_OPTIONS, MISC_OPTIONS, OUTPUT_FORMATS, PORT_PRESETS,
    PortChoice, SCAN_TYPES, TIMING_TEMPLATES,
};
use crate::domain::command::CommandParts;
use crate::domain::portspec;
use crate::domain::target::{self, TargetSpec};

/// 단계 진행 결과. EOF(입력 스트림 종료)는 마법사 전체를 조용히 중단한다.
enum Step<T> {
    Value(T),
    Aborted,
}

pub struct BuildCommandUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn Reporter,
}

impl BuildCommandUseCase<'_> {
    /// 마법사를 실행한다. `preset_target`이 유효하면 대상 단계를 건너뛴다.
    /// EOF로 중단되면 `Ok(None)`.
    pub fn execute(&self, preset_target: Option<&str>) -> Result<Option<CommandParts>> {
        let config = self.config_repo.load()?;
        let mut parts = CommandParts::default();

        let scan_type = match self.select_scan_type()? {
            Step::Value(v) => v,
            Step::Aborted => return Ok(None),
        };
        parts.scan_type = Some(scan_type.clone());

        parts.target = match self.resolve_target(preset_target)? {
            Step::Value(v) => v,
            Step::Aborted => return Ok(None),
        };

        // 호스트 탐색 전용 스캔은 포트 지정을 받지 않는다.
        if matches!(scan_type.as_str(), "-sn" | "-sL") {
            self.reporter.status(
                "ports",
                &format!("{scan_type} performs no port scan; skipping port specification"),
            );
        } else {
            parts.ports = match self.select_ports()? {
                Step::Value(v) => v,
                Step::Aborted => return Ok(None),
            };
        }

        parts.timing = match self.select_timing(config.default_timing_flag())? {
            Step::Value(v) => v,
            Step::Aborted => return Ok(None),
        };

        parts.detection = match self.select_detection()? {
            Step::Value(v) => v,
            Step::Aborted => return Ok(None),
        };

        parts.output = match self.select_output()? {
            Step::Value(v) => v,
            Step::Aborted => return Ok(None),
        };

        parts.misc = match self.read_misc()? {
            Step::Value(v) => v,
            Step::Aborted => return Ok(None),
        };

        parts.validate()?;
        Ok(Some(parts))
    }

    fn select_scan_type(&self) -> Result<Step<String>> {
        self.reporter.section("STEP 1: SELECT SCAN TYPE");
        for (idx, entry) in SCAN_TYPES.iter().enumerate() {
            self.reporter.raw(&format!(
                "{:2}. {:<22} ({:<4}) - {}",
                idx + 1,
                entry.name,
                entry.flag,
                entry.description
            ));
        }

        loop {
            let Some(input) = self.prompter.line("Select scan type [1-12]: ")? else {
                return Ok(Step::Aborted);
            };

            if let Ok(choice) = input.trim().parse::<usize>()
                && (1..=SCAN_TYPES.len()).contains(&choice)
            {
                let entry = &SCAN_TYPES[choice - 1];
                self.reporter
                    .status("scan", &format!("{} ({})", entry.name, entry.flag));
                return Ok(Step::Value(entry.flag.to_string()));
            }

            self.reporter
                .raw("Invalid choice. Please select 1-12.");
        }
    }

    fn resolve_target(&self, preset: Option<&str>) -> Result<Step<String>> {
        if let Some(raw) = preset {
            match TargetSpec::parse(raw) {
                Ok(spec) => {
                    self.reporter
                        .status("target", &format!("{} ({})", raw.trim(), spec.kind()));
                    return Ok(Step::Value(raw.trim().to_string()));
                }
                Err(err) => self.reporter.status("target", &format!("rejected: {err:#}")),
            }
        }

        self.reporter.section("STEP 2: SPECIFY TARGET(S)");
        self.reporter.raw("Examples:");
        self.reporter.raw("  Single IP:      192.168.1.1");
        self.reporter.raw("  IP Range:       192.168.1.1-254");
        self.reporter.raw("  CIDR:           192.168.1.0/24");
        self.reporter.raw("  Hostname:       example.com");
        self.reporter
            .raw("  Multiple:       192.168.1.1,192.168.1.2,example.com");
        self.reporter.raw("  Input file:     -iL targets.txt");

        loop {
            let Some(input) = self.prompter.line("Enter target(s): ")? else {
                return Ok(Step::Aborted);
            };

            match TargetSpec::parse(&input) {
                Ok(spec) => {
                    let target = input.trim().to_string();
                    self.reporter
                        .status("target", &format!("{target} ({})", spec.kind()));
                    return Ok(Step::Value(target));
                }
                Err(err) => self.reporter.raw(&format!("Invalid target: {err:#}")),
            }
        }
    }

    fn select_ports(&self) -> Result<Step<Option<String>>> {
        self.reporter.section("STEP 3: PORT SPECIFICATION (Optional)");
        for (idx, preset) in PORT_PRESETS.iter().enumerate() {
            self.reporter.raw(&format!(
                "{:2}. {:<22} - {}",
                idx + 1,
                preset.name,
                preset.description
            ));
        }

        loop {
            let Some(input) = self.prompter.line("Select port specification [1-13]: ")? else {
                return Ok(Step::Aborted);
            };

            let Ok(choice) = input.trim().parse::<usize>() else {
                self.reporter.raw("Invalid choice. Please select 1-13.");
                continue;
            };
            let Some(preset) = PORT_PRESETS.get(choice.wrapping_sub(1)) else {
                self.reporter.raw("Invalid choice. Please select 1-13.");
                continue;
            };

            let flag = match preset.choice {
                PortChoice::Default => {
                    self.reporter
                        .status("ports", "using NMAP default port selection");
                    return Ok(Step::Value(None));
                }
                PortChoice::Flag(flag) => flag.to_string(),
                PortChoice::CustomRange => match self.read_port_range()? {
                    Step::Value(flag) => flag,
                    Step::Aborted => return Ok(Step::Aborted),
                },
                PortChoice::CustomList => {
                    match self.read_validated(
                        "Enter ports separated by commas (e.g., 80,443,8080): ",
                        portspec::list_flag,
                    )? {
                        Step::Value(flag) => flag,
                        Step::Aborted => return Ok(Step::Aborted),
                    }
                }
                PortChoice::CustomSingle => {
                    match self
                        .read_validated("Enter port number (1-65535): ", portspec::single_flag)?
                    {
                        Step::Value(flag) => flag,
                        Step::Aborted => return Ok(Step::Aborted),
                    }
                }
            };

            self.reporter
                .status("ports", &format!("{} ({flag})", preset.name));
            return Ok(Step::Value(Some(flag)));
        }
    }

    fn read_port_range(&self) -> Result<Step<String>> {
        loop {
            let Some(start) = self.prompter.line("Enter starting port (1-65535): ")? else {
                return Ok(Step::Aborted);
            };
            let Some(end) = self.prompter.line("Enter ending port (1-65535): ")? else {
                return Ok(Step::Aborted);
            };

            match portspec::range_flag(&start, &end) {
                Ok(flag) => return Ok(Step::Value(flag)),
                Err(msg) => self.reporter.raw(&msg),
            }
        }
    }

    fn read_validated(
        &self,
        prompt: &str,
        build: fn(&str) -> Result<String, String>,
    ) -> Result<Step<String>> {
        loop {
            let Some(input) = self.prompter.line(prompt)? else {
                return Ok(Step::Aborted);
            };

            match build(&input) {
                Ok(flag) => return Ok(Step::Value(flag)),
                Err(msg) => self.reporter.raw(&msg),
            }
        }
    }

    fn select_timing(&self, default_flag: Option<String>) -> Result<Step<Option<String>>> {
        self.reporter.section("STEP 4: TIMING TEMPLATE (Optional)");
        for (level, entry) in TIMING_TEMPLATES.iter().enumerate() {
            self.reporter.raw(&format!(
                "{level}. {:<10} ({:<3}) - {}",
                entry.name, entry.flag, entry.description
            ));
        }

        let Some(input) = self
            .prompter
            .line("Select timing template (0-5, or Enter for default): ")?
        else {
            return Ok(Step::Aborted);
        };

        if let Ok(level) = input.trim().parse::<usize>()
            && level < TIMING_TEMPLATES.len()
        {
            let entry = &TIMING_TEMPLATES[level];
            self.reporter
                .status("timing", &format!("{} ({})", entry.name, entry.flag));
            return Ok(Step::Value(Some(entry.flag.to_string())));
        }

        // 빈 입력/알 수 없는 입력은 기본값으로 처리한다(설정의 default_timing 우선).
        match &default_flag {
            Some(flag) => self
                .reporter
                .status("timing", &format!("using configured default ({flag})")),
            None => self.reporter.status("timing", "using NMAP default timing"),
        }
        Ok(Step::Value(default_flag))
    }

    fn select_detection(&self) -> Result<Step<Vec<String>>> {
        self.reporter.section("STEP 5: DETECTION OPTIONS (Optional)");
        for (idx, entry) in DETECTION_OPTIONS.iter().enumerate() {
            self.reporter.raw(&format!(
                "{}. {:<26} ({:<20}) - {}",
                idx + 1,
                entry.name,
                entry.flag,
                entry.description
            ));
        }

        let Some(input) = self
            .prompter
            .line("Select detection options (comma-separated, e.g., 1,2,3 or Enter for none): ")?
        else {
            return Ok(Step::Aborted);
        };

        let mut flags = Vec::new();
        for choice in input.split(',') {
            let choice = choice.trim();
            if choice.is_empty() {
                continue;
            }

            let Ok(index) = choice.parse::<usize>() else {
                self.reporter
                    .raw(&format!("Skipping unknown option: {choice}"));
                continue;
            };
            let Some(entry) = DETECTION_OPTIONS.get(index.wrapping_sub(1)) else {
                self.reporter
                    .raw(&format!("Skipping unknown option: {choice}"));
                continue;
            };

            if index == CUSTOM_SCRIPT_CHOICE {
                match self.read_script_name()? {
                    Step::Value(flag) => {
                        self.reporter.status("detect", &flag);
                        flags.push(flag);
                    }
                    Step::Aborted => return Ok(Step::Aborted),
                }
            } else {
                self.reporter.status("detect", entry.name);
                flags.push(entry.flag.to_string());
            }
        }

        Ok(Step::Value(flags))
    }

    fn read_script_name(&self) -> Result<Step<String>> {
        loop {
            let Some(name) = self.prompter.line("Enter script name: ")? else {
                return Ok(Step::Aborted);
            };

            let name = name.trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                self.reporter.raw("Script name must be a single word.");
                continue;
            }
            if let Some(forbidden) = target::contains_shell_metacharacter(name) {
                self.reporter
                    .raw(&format!("Script name contains forbidden character '{forbidden}'."));
                continue;
            }

            return Ok(Step::Value(format!("--script={name}")));
        }
    }

    fn select_output(&self) -> Result<Step<Option<String>>> {
        self.reporter.section("STEP 6: OUTPUT OPTIONS (Optional)");
        for (idx, format) in OUTPUT_FORMATS.iter().enumerate() {
            self.reporter.raw(&format!(
                "{}. {:<20} ({})",
                idx + 1,
                format.name,
                format.flag
            ));
        }

        let Some(input) = self
            .prompter
            .line("Select output format (1-5, or Enter for screen only): ")?
        else {
            return Ok(Step::Aborted);
        };

        let Ok(choice) = input.trim().parse::<usize>() else {
            self.reporter.status("output", "screen only");
            return Ok(Step::Value(None));
        };
        let Some(format) = OUTPUT_FORMATS.get(choice.wrapping_sub(1)) else {
            self.reporter.status("output", "screen only");
            return Ok(Step::Value(None));
        };

        let default_name = default_artifact_name();
        let prompt = format!("Enter filename (or Enter for '{default_name}'): ");

        loop {
            let Some(input) = self.prompter.line(&prompt)? else {
                return Ok(Step::Aborted);
            };

            let name = input.trim();
            let filename = if name.is_empty() { &default_name } else { name };

            if filename.contains(char::is_whitespace) {
                self.reporter.raw("Filename cannot contain spaces.");
                continue;
            }
            if let Some(forbidden) = target::contains_shell_metacharacter(filename) {
                self.reporter
                    .raw(&format!("Filename contains forbidden character '{forbidden}'."));
                continue;
            }

            let flag = format!("{} {filename}{}", format.flag, format.ext);
            self.reporter
                .status("output", &format!("{} -> {filename}{}", format.name, format.ext));
            return Ok(Step::Value(Some(flag)));
        }
    }

    fn read_misc(&self) -> Result<Step<Vec<String>>> {
        self.reporter.section("STEP 7: ADDITIONAL OPTIONS (Optional)");
        self.reporter.raw("Common options:");
        for (flag, description) in MISC_OPTIONS {
            self.reporter
                .raw(&format!("  {flag:<8} : {description}"));
        }

        loop {
            let Some(input) = self
                .prompter
                .line("Enter additional options (space-separated, or Enter for none): ")?
            else {
                return Ok(Step::Aborted);
            };

            let tokens: Vec<String> = input.split_whitespace().map(str::to_string).collect();

            if let Some(forbidden) = tokens
                .iter()
                .find_map(|t| target::contains_shell_metacharacter(t))
            {
                self.reporter
                    .raw(&format!("Options contain forbidden character '{forbidden}'."));
                continue;
            }

            if !tokens.is_empty() {
                self.reporter.status("misc", &tokens.join(" "));
            }
            return Ok(Step::Value(tokens));
        }
    }
}

/// 출력/스크립트 파일의 기본 이름(타임스탬프 기반).
pub fn default_artifact_name() -> String {
    format!(
        "nmap_scan_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}
