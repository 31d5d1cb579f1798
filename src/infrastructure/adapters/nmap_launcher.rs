//! 외부 nmap 바이너리를 실행하는 어댑터.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::ScanLauncher;
use crate::infrastructure::config::command_exists;

const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// 포그라운드에서 nmap 프로세스를 띄우는 런처.
pub struct NmapLauncher;

#[async_trait]
impl ScanLauncher for NmapLauncher {
    /// `--version` 출력 첫 줄을 얻는다. 바이너리가 없으면 `None`.
    async fn probe_version(&self, program: &str) -> Result<Option<String>> {
        if !command_exists(program) {
            return Ok(None);
        }

        let output = tokio::time::timeout(
            VERSION_PROBE_TIMEOUT,
            Command::new(program)
                .arg("--version")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .output(),
        )
        .await
        .with_context(|| format!("{program} --version timed out"))?
        .with_context(|| format!("failed to run {program} --version"))?;

        let first_line = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty());
        Ok(first_line)
    }

    /// 표준 입출력을 그대로 물려주고 종료 코드를 돌려준다.
    async fn launch(&self, program: &str, args: &[String]) -> Result<i32> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to launch {program}"))?;

        // Killed by signal on unix leaves no code.
        Ok(status.code().unwrap_or(-1))
    }
}
