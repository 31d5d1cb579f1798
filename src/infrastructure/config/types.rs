//! 설정 스키마와 병합/해석 규칙.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::history::HISTORY_CAP;

pub const DEFAULT_NMAP_COMMAND: &str = "nmap";
pub const DEFAULT_SCRIPT_SHELL: &str = "/bin/bash";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 실행할 nmap 바이너리 이름/경로
    pub nmap_command: Option<String>,
    /// 히스토리 보존 개수
    pub history_limit: Option<usize>,
    /// 타이밍 단계를 건너뛸 때 적용할 기본 템플릿(0-5)
    pub default_timing: Option<u8>,
    /// 내보낸 스크립트의 셰뱅 인터프리터
    pub script_shell: Option<String>,
    /// 히스토리 파일 경로 override
    pub history_path: Option<String>,
}

impl Config {
    pub fn nmap_command(&self) -> String {
        self.defaults
            .nmap_command
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NMAP_COMMAND.to_string())
    }

    pub fn history_limit(&self) -> usize {
        self.defaults.history_limit.unwrap_or(HISTORY_CAP)
    }

    /// 기본 타이밍을 플래그 문자열로 해석한다. 0-5 범위 밖 값은 무시한다.
    pub fn default_timing_flag(&self) -> Option<String> {
        let level = self.defaults.default_timing?;
        if level > 5 {
            return None;
        }
        Some(format!("-T{level}"))
    }

    pub fn script_shell(&self) -> String {
        self.defaults
            .script_shell
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCRIPT_SHELL.to_string())
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.defaults
            .history_path
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub(crate) fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
    }
}

impl DefaultsConfig {
    pub(crate) fn merge_from(&mut self, other: DefaultsConfig) {
        if other.nmap_command.is_some() {
            self.nmap_command = other.nmap_command;
        }
        if other.history_limit.is_some() {
            self.history_limit = other.history_limit;
        }
        if other.default_timing.is_some() {
            self.default_timing = other.default_timing;
        }
        if other.script_shell.is_some() {
            self.script_shell = other.script_shell;
        }
        if other.history_path.is_some() {
            self.history_path = other.history_path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::default();
        assert_eq!(config.nmap_command(), "nmap");
        assert_eq!(config.history_limit(), HISTORY_CAP);
        assert_eq!(config.default_timing_flag(), None);
        assert_eq!(config.script_shell(), "/bin/bash");
        assert!(config.history_path().is_none());
    }

    #[test]
    fn later_config_wins_field_by_field() {
        let mut base: Config = serde_json::from_str(
            r#"{"defaults":{"nmap_command":"/usr/bin/nmap","history_limit":10}}"#,
        )
        .unwrap();
        let overlay: Config =
            serde_json::from_str(r#"{"defaults":{"history_limit":20,"default_timing":4}}"#)
                .unwrap();

        base.merge_from(overlay);
        assert_eq!(base.nmap_command(), "/usr/bin/nmap");
        assert_eq!(base.history_limit(), 20);
        assert_eq!(base.default_timing_flag(), Some("-T4".to_string()));
    }

    #[test]
    fn out_of_range_timing_is_ignored() {
        let config: Config =
            serde_json::from_str(r#"{"defaults":{"default_timing":9}}"#).unwrap();
        assert_eq!(config.default_timing_flag(), None);
    }
}
