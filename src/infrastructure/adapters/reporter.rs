//! 터미널 출력 포맷을 담당하는 어댑터.

use crate::application::ports::Reporter;

const SECTION_RULE: &str = "====================";

/// 표준 출력 기반 리포터.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn section(&self, title: &str) {
        println!();
        println!("{SECTION_RULE} {title} {SECTION_RULE}");
    }

    fn kv(&self, key: &str, value: &str) {
        println!("  {key:<14}: {value}");
    }

    fn status(&self, tag: &str, message: &str) {
        println!("[{tag:<10}] {message}");
    }

    fn raw(&self, line: &str) {
        println!("{line}");
    }
}
