//! 생성된 명령을 실행 가능한 셸 스크립트로 저장하는 어댑터.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::application::ports::ScriptExporter;
use crate::domain::command;

/// bash 스크립트 파일을 만들어 주는 내보내기 구현.
pub struct BashScriptExporter;

impl BashScriptExporter {
    fn render_script(command_line: &str, shell: &str) -> String {
        let mut script = String::new();
        script.push_str(&format!("#!{shell}\n"));
        script.push_str(&format!(
            "# Generated by mapsmith on {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        script.push_str("#\n");
        for (token, description) in command::explain(command_line) {
            script.push_str(&format!("#   {token:<24} {description}\n"));
        }
        script.push('\n');
        script.push_str(command_line);
        script.push('\n');
        script
    }
}

impl ScriptExporter for BashScriptExporter {
    fn export(&self, path: &Path, command_line: &str, shell: &str) -> Result<PathBuf> {
        let script = Self::render_script(command_line, shell);
        fs::write(path, script)
            .with_context(|| format!("failed to write script: {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755))
                .with_context(|| format!("failed to chmod script: {}", path.display()))?;
        }

        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_contains_shebang_and_command() {
        let script = BashScriptExporter::render_script("nmap -sS -T4 10.0.0.1", "/bin/bash");
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.ends_with("nmap -sS -T4 10.0.0.1\n"));
        assert!(script.contains("-sS"));
    }

    #[cfg(unix)]
    #[test]
    fn exported_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.sh");
        BashScriptExporter
            .export(&path, "nmap -sn 192.168.0.0/24", "/bin/bash")
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
