//! nmap 바이너리 존재/버전 확인 유스케이스.

use anyhow::Result;

use crate::application::ports::{ConfigRepository, ScanLauncher};

/// 프로브 결과. `version`이 `None`이면 바이너리를 찾지 못한 것이다.
#[derive(Debug, Clone)]
pub struct NmapProbe {
    pub command: String,
    pub version: Option<String>,
}

impl NmapProbe {
    pub fn install_hints() -> [&'static str; 3] {
        [
            "Ubuntu/Debian: sudo apt-get install nmap",
            "CentOS/RHEL:   sudo yum install nmap",
            "macOS:         brew install nmap",
        ]
    }
}

pub struct CheckNmapUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub launcher: &'a dyn ScanLauncher,
}

impl CheckNmapUseCase<'_> {
    /// 설정된 nmap 명령의 버전 라인을 조회한다.
    pub async fn execute(&self) -> Result<NmapProbe> {
        let config = self.config_repo.load()?;
        let command = config.nmap_command();
        let version = self.launcher.probe_version(&command).await?;

        Ok(NmapProbe { command, version })
    }
}
