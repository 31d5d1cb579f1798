//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::types::DefaultsConfig;
use super::utils::command_exists;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub nmap_command: String,
    /// nmap_command가 PATH에서 실행 가능한지
    pub nmap_available: bool,
    pub history_limit: usize,
    pub default_timing: Option<String>,
    pub script_shell: String,
    pub history_path: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let nmap_command = loaded.config.nmap_command();
        let nmap_available = command_exists(&nmap_command);

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: loaded.config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                nmap_available,
                history_limit: loaded.config.history_limit(),
                default_timing: loaded.config.default_timing_flag(),
                script_shell: loaded.config.script_shell(),
                history_path: loaded
                    .config
                    .history_path()
                    .map(|p| p.display().to_string()),
                nmap_command,
            },
        }
    }
}
