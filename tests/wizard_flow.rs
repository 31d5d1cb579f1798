//! 포트 가짜 구현으로 마법사/후처리 유스케이스를 검증하는 통합 테스트.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use mapsmith::application::ports::{
    ConfigRepository, HistoryStore, Prompter, Reporter, ScanLauncher, ScriptExporter,
};
use mapsmith::application::usecases::build_command::BuildCommandUseCase;
use mapsmith::application::usecases::finalize_command::FinalizeCommandUseCase;
use mapsmith::application::usecases::quick_template::QuickTemplateUseCase;
use mapsmith::application::usecases::show_history::ShowHistoryUseCase;
use mapsmith::domain::history::{self, HistoryEntry};
use mapsmith::infrastructure::config::Config;

struct FixedConfigRepo(Config);

impl ConfigRepository for FixedConfigRepo {
    fn load(&self) -> Result<Config> {
        Ok(self.0.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok("{}".to_string())
    }

    fn editable_config_path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/dev/null"))
    }
}

struct ScriptedPrompter {
    lines: Mutex<VecDeque<&'static str>>,
    confirms: Mutex<VecDeque<bool>>,
}

impl ScriptedPrompter {
    fn new(lines: &[&'static str]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().copied().collect()),
            confirms: Mutex::new(VecDeque::new()),
        }
    }

    fn with_confirms(lines: &[&'static str], confirms: &[bool]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().copied().collect()),
            confirms: Mutex::new(confirms.iter().copied().collect()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn line(&self, _prompt: &str) -> Result<Option<String>> {
        // 대본이 바닥나면 EOF를 흉내 낸다.
        Ok(self.lines.lock().unwrap().pop_front().map(str::to_string))
    }

    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(self.confirms.lock().unwrap().pop_front().unwrap_or(false))
    }
}

struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl HistoryStore for MemoryHistory {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn append(&self, entry: HistoryEntry, cap: usize) -> Result<()> {
        history::push_capped(&mut self.entries.lock().unwrap(), entry, cap);
        Ok(())
    }

    fn path(&self) -> PathBuf {
        PathBuf::from("memory://history")
    }
}

struct RecordingLauncher {
    launched: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingLauncher {
    fn new() -> Self {
        Self {
            launched: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ScanLauncher for RecordingLauncher {
    async fn probe_version(&self, _program: &str) -> Result<Option<String>> {
        Ok(Some("Nmap version 7.94".to_string()))
    }

    async fn launch(&self, program: &str, args: &[String]) -> Result<i32> {
        self.launched
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(0)
    }
}

struct RecordingExporter {
    exported: Mutex<Vec<(PathBuf, String, String)>>,
}

impl RecordingExporter {
    fn new() -> Self {
        Self {
            exported: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptExporter for RecordingExporter {
    fn export(&self, path: &Path, command: &str, shell: &str) -> Result<PathBuf> {
        self.exported.lock().unwrap().push((
            path.to_path_buf(),
            command.to_string(),
            shell.to_string(),
        ));
        Ok(path.to_path_buf())
    }
}

struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _name: &str) {}
    fn kv(&self, _key: &str, _value: &str) {}
    fn status(&self, _scope: &str, _message: &str) {}
    fn raw(&self, _line: &str) {}
}

fn build_usecase<'a>(
    config: &'a FixedConfigRepo,
    prompter: &'a ScriptedPrompter,
    reporter: &'a NullReporter,
) -> BuildCommandUseCase<'a> {
    BuildCommandUseCase {
        config_repo: config,
        prompter,
        reporter,
    }
}

#[test]
fn wizard_assembles_flags_in_canonical_order() {
    let config = FixedConfigRepo(Config::default());
    // scan=SYN, target, ports=fast, timing=T4, detect=sV+O, output=screen, misc=none
    let prompter = ScriptedPrompter::new(&["1", "192.168.1.1", "2", "4", "1,2", "", ""]);
    let reporter = NullReporter;

    let parts = build_usecase(&config, &prompter, &reporter)
        .execute(None)
        .unwrap()
        .expect("wizard should complete");

    assert_eq!(parts.render(), "nmap -sS -F -T4 -sV -O 192.168.1.1");
}

#[test]
fn ping_scan_skips_port_step() {
    let config = FixedConfigRepo(Config::default());
    // scan=-sn이면 포트 단계 입력 자체를 소비하지 않는다.
    let prompter = ScriptedPrompter::new(&["10", "192.168.1.0/24", "", "", "", ""]);
    let reporter = NullReporter;

    let parts = build_usecase(&config, &prompter, &reporter)
        .execute(None)
        .unwrap()
        .expect("wizard should complete");

    assert_eq!(parts.render(), "nmap -sn 192.168.1.0/24");
}

#[test]
fn configured_default_timing_applies_on_empty_input() {
    let config: Config =
        serde_json::from_str(r#"{"defaults":{"default_timing":4}}"#).unwrap();
    let config = FixedConfigRepo(config);
    let prompter = ScriptedPrompter::new(&["1", "10.0.0.5", "1", "", "", "", ""]);
    let reporter = NullReporter;

    let parts = build_usecase(&config, &prompter, &reporter)
        .execute(None)
        .unwrap()
        .expect("wizard should complete");

    assert_eq!(parts.render(), "nmap -sS -T4 10.0.0.5");
}

#[test]
fn eof_aborts_wizard_without_error() {
    let config = FixedConfigRepo(Config::default());
    let prompter = ScriptedPrompter::new(&["1"]);
    let reporter = NullReporter;

    let result = build_usecase(&config, &prompter, &reporter)
        .execute(None)
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn preset_target_skips_target_prompt() {
    let config = FixedConfigRepo(Config::default());
    let prompter = ScriptedPrompter::new(&["1", "1", "", "", "", ""]);
    let reporter = NullReporter;

    let parts = build_usecase(&config, &prompter, &reporter)
        .execute(Some("scanme.nmap.org"))
        .unwrap()
        .expect("wizard should complete");

    assert_eq!(parts.target, "scanme.nmap.org");
    assert_eq!(parts.render(), "nmap -sS scanme.nmap.org");
}

#[test]
fn quick_template_renders_without_prompts() {
    let prompter = ScriptedPrompter::new(&[]);
    let reporter = NullReporter;
    let usecase = QuickTemplateUseCase {
        prompter: &prompter,
        reporter: &reporter,
    };

    let (command, target) = usecase
        .execute(Some(2), Some("10.0.0.5"))
        .unwrap()
        .expect("template should resolve");

    assert_eq!(command, "nmap -F 10.0.0.5");
    assert_eq!(target, "10.0.0.5");
}

#[tokio::test]
async fn finalize_appends_history_and_launches_scan() {
    let config = FixedConfigRepo(Config::default());
    let history = MemoryHistory::new();
    let launcher = RecordingLauncher::new();
    let exporter = RecordingExporter::new();
    // option 1 = execute (confirmed), option 4 = return
    let prompter = ScriptedPrompter::with_confirms(&["1", "4"], &[true]);
    let reporter = NullReporter;

    let usecase = FinalizeCommandUseCase {
        config_repo: &config,
        history: &history,
        launcher: &launcher,
        exporter: &exporter,
        prompter: &prompter,
        reporter: &reporter,
    };

    usecase
        .execute("nmap -sS -F 192.168.1.1".to_string(), "192.168.1.1".to_string())
        .await
        .unwrap();

    let entries = history.load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].command, "nmap -sS -F 192.168.1.1");
    assert_eq!(entries[0].target, "192.168.1.1");

    let launched = launcher.launched.lock().unwrap();
    assert_eq!(launched.len(), 1);
    assert_eq!(launched[0].0, "nmap");
    assert_eq!(launched[0].1, vec!["-sS", "-F", "192.168.1.1"]);
}

#[tokio::test]
async fn finalize_saves_script_with_sh_suffix() {
    let config = FixedConfigRepo(Config::default());
    let history = MemoryHistory::new();
    let launcher = RecordingLauncher::new();
    let exporter = RecordingExporter::new();
    // option 2 = save script named "myscan", option 4 = return
    let prompter = ScriptedPrompter::new(&["2", "myscan", "4"]);
    let reporter = NullReporter;

    let usecase = FinalizeCommandUseCase {
        config_repo: &config,
        history: &history,
        launcher: &launcher,
        exporter: &exporter,
        prompter: &prompter,
        reporter: &reporter,
    };

    usecase
        .execute("nmap -sn 10.0.0.0/24".to_string(), "10.0.0.0/24".to_string())
        .await
        .unwrap();

    let exported = exporter.exported.lock().unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].0, PathBuf::from("myscan.sh"));
    assert_eq!(exported[0].1, "nmap -sn 10.0.0.0/24");
    assert_eq!(exported[0].2, "/bin/bash");
}

#[tokio::test]
async fn finalize_rejects_modified_command_with_metacharacters() {
    let config = FixedConfigRepo(Config::default());
    let history = MemoryHistory::new();
    let launcher = RecordingLauncher::new();
    let exporter = RecordingExporter::new();
    // option 3 = modify with an injection attempt, then execute, then return
    let prompter =
        ScriptedPrompter::with_confirms(&["3", "nmap -sS 10.0.0.1; rm -rf /", "1", "4"], &[true]);
    let reporter = NullReporter;

    let usecase = FinalizeCommandUseCase {
        config_repo: &config,
        history: &history,
        launcher: &launcher,
        exporter: &exporter,
        prompter: &prompter,
        reporter: &reporter,
    };

    usecase
        .execute("nmap -sS 10.0.0.1".to_string(), "10.0.0.1".to_string())
        .await
        .unwrap();

    // 수정이 거부되어 원본 명령이 그대로 실행된다.
    let launched = launcher.launched.lock().unwrap();
    assert_eq!(launched.len(), 1);
    assert_eq!(launched[0].1, vec!["-sS", "10.0.0.1"]);
}

#[test]
fn history_listing_shows_only_recent_entries() {
    let history = MemoryHistory::new();
    for i in 0..15 {
        history
            .append(
                HistoryEntry::new(format!("nmap -sn 10.0.0.{i}"), format!("10.0.0.{i}")),
                50,
            )
            .unwrap();
    }

    // 12번째 항목 선택 시도: 화면에는 마지막 10개만 있으므로 6번째(=전체 11번째)를 고른다.
    let prompter = ScriptedPrompter::new(&["6"]);
    let reporter = NullReporter;
    let usecase = ShowHistoryUseCase {
        history: &history,
        prompter: &prompter,
        reporter: &reporter,
    };

    let picked = usecase.execute(true).unwrap().expect("entry should be picked");
    assert_eq!(picked.target, "10.0.0.10");
}
