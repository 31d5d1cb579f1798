//! 명령 히스토리 엔티티와 상한 정책.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 히스토리 기본 상한. 설정(history_limit)으로 조정할 수 있다.
pub const HISTORY_CAP: usize = 50;

/// 저장되는 히스토리 한 건. 디스크에는 RFC 3339 타임스탬프로 남는다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub target: String,
}

impl HistoryEntry {
    /// 현재 시각으로 새 히스토리 항목을 만든다.
    pub fn new(command: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.into(),
            target: target.into(),
        }
    }

    /// 목록 출력용 짧은 타임스탬프.
    pub fn short_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// 항목을 뒤에 붙이고 상한을 넘는 가장 오래된 항목부터 버린다.
pub fn push_capped(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry, cap: usize) {
    entries.push(entry);
    if cap > 0 && entries.len() > cap {
        let overflow = entries.len() - cap;
        entries.drain(..overflow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_capped_drops_oldest_first() {
        let mut entries = Vec::new();
        for i in 0..55 {
            push_capped(
                &mut entries,
                HistoryEntry::new(format!("nmap -sn 10.0.0.{i}"), format!("10.0.0.{i}")),
                HISTORY_CAP,
            );
        }

        assert_eq!(entries.len(), HISTORY_CAP);
        assert_eq!(entries[0].target, "10.0.0.5");
        assert_eq!(entries.last().unwrap().target, "10.0.0.54");
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = HistoryEntry::new("nmap -F example.com", "example.com");
        let raw = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, entry);
    }
}
