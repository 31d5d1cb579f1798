//! 표준 입력으로 사용자 응답을 받는 어댑터.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::application::ports::Prompter;

/// stdin 한 줄 읽기 기반 프롬프트 구현.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    /// 프롬프트를 출력하고 한 줄을 읽는다. EOF면 `None`.
    fn line(&self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut buffer = String::new();
        let bytes = io::stdin()
            .lock()
            .read_line(&mut buffer)
            .context("failed to read from stdin")?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    /// y/yes 응답만 승인으로 처리한다.
    fn confirm(&self, question: &str) -> Result<bool> {
        let Some(answer) = self.line(&format!("{question} (y/yes): "))? else {
            return Ok(false);
        };
        let answer = answer.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}
