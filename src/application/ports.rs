//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::history::HistoryEntry;
use crate::infrastructure::config::Config;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
    fn editable_config_path(&self) -> Result<PathBuf>;
}

/// 명령 히스토리 영속화 포트.
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Result<Vec<HistoryEntry>>;
    fn append(&self, entry: HistoryEntry, cap: usize) -> Result<()>;
    fn path(&self) -> PathBuf;
}

/// 대화형 입력 포트. `line`은 EOF에서 `None`을 반환한다.
pub trait Prompter: Send + Sync {
    fn line(&self, prompt: &str) -> Result<Option<String>>;
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// 외부 nmap 바이너리 실행 포트.
#[async_trait]
pub trait ScanLauncher: Send + Sync {
    /// `<program> --version`을 프로브한다. 바이너리가 없으면 `None`.
    async fn probe_version(&self, program: &str) -> Result<Option<String>>;
    /// 스캔을 전면(foreground)에서 실행하고 종료 코드를 돌려준다.
    async fn launch(&self, program: &str, args: &[String]) -> Result<i32>;
}

/// 명령을 bash 스크립트로 내보내는 포트.
pub trait ScriptExporter: Send + Sync {
    fn export(&self, path: &Path, command: &str, shell: &str) -> Result<PathBuf>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
