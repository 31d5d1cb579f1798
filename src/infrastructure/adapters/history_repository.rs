//! 명령 히스토리를 JSON 파일로 보관하는 어댑터.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::HistoryStore;
use crate::domain::history::{self, HistoryEntry};

const HISTORY_PATH_ENV: &str = "MAPSMITH_HISTORY";
const HISTORY_FILE_NAME: &str = "history.json";

/// JSON 파일 기반 히스토리 저장소.
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    /// 기본 위치 규칙으로 저장소를 만든다.
    ///
    /// 우선순위: 명시적 override > `MAPSMITH_HISTORY` 환경변수 >
    /// 사용자 데이터 디렉토리(`data_dir/mapsmith/history.json`).
    pub fn new(override_path: Option<PathBuf>) -> Self {
        let path = override_path
            .or_else(|| std::env::var(HISTORY_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(default_history_path);
        Self { path }
    }

    /// 지정한 파일 경로를 그대로 쓰는 저장소를 만든다.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mapsmith")
        .join(HISTORY_FILE_NAME)
}

impl HistoryStore for JsonHistoryStore {
    /// 히스토리 전체를 읽는다. 파일이 없거나 손상되었으면 빈 목록으로 시작한다.
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read history: {}", self.path.display()));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "history file is corrupt; starting fresh"
                );
                Ok(Vec::new())
            }
        }
    }

    fn append(&self, entry: HistoryEntry, cap: usize) -> Result<()> {
        let mut entries = self.load()?;
        history::push_capped(&mut entries, entry, cap);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create history directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write history: {}", self.path.display()))?;
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::at(dir.path().join("none.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonHistoryStore::at(path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_creates_parent_and_caps() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonHistoryStore::at(dir.path().join("nested").join("history.json"));

        for i in 0..4 {
            let entry = HistoryEntry::new(format!("nmap -sS host{i}"), format!("host{i}"));
            store.append(entry, 3).unwrap();
        }

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].target, "host1");
        assert_eq!(entries[2].target, "host3");
    }
}
