//! 설정 모듈 공용 유틸리티.

use std::env;
use std::path::Path;

/// 로컬 명령이 실행 가능한지 탐지한다.
pub fn command_exists(command: &str) -> bool {
    if command.trim().is_empty() {
        return false;
    }

    // 경로가 주어지면 파일 존재만 검사한다.
    let command_path = Path::new(command);
    if command_path.components().count() > 1 {
        return command_path.is_file();
    }

    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&path_var).any(|dir| {
        let candidate = dir.join(command);
        if candidate.is_file() {
            return true;
        }
        // Windows는 확장자를 생략할 수 있다.
        cfg!(windows) && dir.join(format!("{command}.exe")).is_file()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_never_available() {
        assert!(!command_exists(""));
        assert!(!command_exists("   "));
    }

    #[test]
    fn path_like_command_checks_file_presence() {
        assert!(!command_exists("/nonexistent/dir/nmap"));
    }
}
