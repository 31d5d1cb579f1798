//! 히스토리 열람/재사용 유스케이스.

use anyhow::Result;

use crate::application::ports::{HistoryStore, Prompter, Reporter};
use crate::domain::history::HistoryEntry;

/// 한 화면에 보여주는 최근 항목 수.
const VISIBLE_ENTRIES: usize = 10;

pub struct ShowHistoryUseCase<'a> {
    pub history: &'a dyn HistoryStore,
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn Reporter,
}

impl ShowHistoryUseCase<'_> {
    /// 최근 항목을 출력한다. `pick`이면 재사용할 항목 선택까지 받는다.
    pub fn execute(&self, pick: bool) -> Result<Option<HistoryEntry>> {
        let entries = self.history.load()?;
        if entries.is_empty() {
            self.reporter.status("history", "no commands in history");
            return Ok(None);
        }

        self.reporter.section("COMMAND HISTORY");
        self.reporter
            .kv("file", &self.history.path().display().to_string());

        let shown = &entries[entries.len().saturating_sub(VISIBLE_ENTRIES)..];
        for (idx, entry) in shown.iter().enumerate() {
            self.reporter.raw(&format!(
                "{:2}. [{}] {}",
                idx + 1,
                entry.short_timestamp(),
                entry.command
            ));
        }

        if !pick {
            return Ok(None);
        }

        let prompt = format!(
            "Select a command to reuse (1-{}) or Enter to continue: ",
            shown.len()
        );
        let Some(input) = self.prompter.line(&prompt)? else {
            return Ok(None);
        };

        let Ok(choice) = input.trim().parse::<usize>() else {
            return Ok(None);
        };
        let Some(entry) = (choice > 0).then(|| shown.get(choice - 1)).flatten() else {
            return Ok(None);
        };

        self.reporter.status("history", &format!("reusing: {}", entry.command));
        Ok(Some(entry.clone()))
    }
}
