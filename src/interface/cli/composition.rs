//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::build_command::BuildCommandUseCase;
use crate::application::usecases::check_nmap::CheckNmapUseCase;
use crate::application::usecases::edit_config::EditConfigUseCase;
use crate::application::usecases::finalize_command::FinalizeCommandUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::quick_template::QuickTemplateUseCase;
use crate::application::usecases::show_history::ShowHistoryUseCase;
use crate::infrastructure::adapters::{
    BashScriptExporter, ConsoleReporter, JsonConfigRepository, JsonHistoryStore, NmapLauncher,
    StdinPrompter,
};
use crate::infrastructure::config::Config;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    history: JsonHistoryStore,
    launcher: NmapLauncher,
    exporter: BashScriptExporter,
    prompter: StdinPrompter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new()
    }
}

impl AppComposition {
    pub fn new() -> Self {
        // 히스토리 경로는 설정이 지정할 수 있다. 설정 로드 실패 시 기본 위치를 쓴다.
        let history_override = Config::load().ok().and_then(|c| c.history_path());

        Self {
            config_repo: JsonConfigRepository,
            history: JsonHistoryStore::new(history_override),
            launcher: NmapLauncher,
            exporter: BashScriptExporter,
            prompter: StdinPrompter,
            reporter: ConsoleReporter,
        }
    }

    /// 명령 조립 마법사 유스케이스를 생성한다.
    pub fn build_command_usecase(&self) -> BuildCommandUseCase<'_> {
        BuildCommandUseCase {
            config_repo: &self.config_repo,
            prompter: &self.prompter,
            reporter: &self.reporter,
        }
    }

    /// 조립된 명령 후처리 유스케이스를 생성한다.
    pub fn finalize_command_usecase(&self) -> FinalizeCommandUseCase<'_> {
        FinalizeCommandUseCase {
            config_repo: &self.config_repo,
            history: &self.history,
            launcher: &self.launcher,
            exporter: &self.exporter,
            prompter: &self.prompter,
            reporter: &self.reporter,
        }
    }

    /// 빠른 템플릿 유스케이스를 생성한다.
    pub fn quick_template_usecase(&self) -> QuickTemplateUseCase<'_> {
        QuickTemplateUseCase {
            prompter: &self.prompter,
            reporter: &self.reporter,
        }
    }

    /// 히스토리 열람 유스케이스를 생성한다.
    pub fn show_history_usecase(&self) -> ShowHistoryUseCase<'_> {
        ShowHistoryUseCase {
            history: &self.history,
            prompter: &self.prompter,
            reporter: &self.reporter,
        }
    }

    /// nmap 존재/버전 확인 유스케이스를 생성한다.
    pub fn check_nmap_usecase(&self) -> CheckNmapUseCase<'_> {
        CheckNmapUseCase {
            config_repo: &self.config_repo,
            launcher: &self.launcher,
        }
    }

    /// 설정 편집 유스케이스를 생성한다.
    pub fn edit_config_usecase(&self) -> EditConfigUseCase<'_> {
        EditConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }
}
