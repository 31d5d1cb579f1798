//! mapsmith library root.
//! Clean Architecture 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use interface::cli::AppComposition;
use interface::cli::repl::run_repl;

/// 라이브러리 직접 호출용 대화형 쉘 실행 함수.
pub async fn run_interactive() -> Result<()> {
    let composition = AppComposition::default();
    run_repl(&composition).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
