//! nmap 명령 누적/포매팅 모델.
//! 마법사 단계가 채운 슬롯을 하나의 명령 문자열로 조립하고, 역으로 토큰별 설명을 만든다.

use anyhow::{Result, bail};

use crate::domain::catalog;

/// 마법사 세션 동안 채워지는 플래그 슬롯.
/// 슬롯 순서가 곧 렌더링 순서이며 대상은 항상 마지막이다.
#[derive(Debug, Clone, Default)]
pub struct CommandParts {
    pub scan_type: Option<String>,
    pub ports: Option<String>,
    pub timing: Option<String>,
    pub detection: Vec<String>,
    pub output: Option<String>,
    pub misc: Vec<String>,
    pub target: String,
}

impl CommandParts {
    /// 채워진 슬롯만으로 최종 명령 문자열을 만든다.
    pub fn render(&self) -> String {
        let mut tokens: Vec<&str> = vec!["nmap"];

        if let Some(scan_type) = &self.scan_type {
            tokens.push(scan_type);
        }
        if let Some(ports) = &self.ports {
            tokens.push(ports);
        }
        if let Some(timing) = &self.timing {
            tokens.push(timing);
        }
        for flag in &self.detection {
            tokens.push(flag);
        }
        if let Some(output) = &self.output {
            tokens.push(output);
        }
        for flag in &self.misc {
            tokens.push(flag);
        }
        tokens.push(&self.target);

        tokens.join(" ")
    }

    /// 구문상 모순인 조합을 거부한다.
    /// 호스트 탐색 전용 스캔(-sn/-sL)은 포트 지정을 가질 수 없다.
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            bail!("target is required");
        }

        if self.ports.is_some()
            && let Some(scan_type) = &self.scan_type
            && matches!(scan_type.as_str(), "-sn" | "-sL")
        {
            bail!("{scan_type} performs no port scan; remove the port specification");
        }

        Ok(())
    }
}

/// 명령 문자열을 실행용 프로그램/인자 목록으로 나눈다.
/// 셸을 거치지 않고 argv로 spawn하기 위한 단순 공백 분할이다.
pub fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = command.split_whitespace().map(str::to_string);
    let program = tokens.next()?;
    Some((program, tokens.collect()))
}

/// 렌더링된 명령을 토큰별 설명 쌍으로 풀어낸다(학습 모드 출력용).
pub fn explain(command: &str) -> Vec<(String, String)> {
    let tokens: Vec<&str> = command.split_whitespace().collect();
    let last = tokens.len().saturating_sub(1);
    let mut lines = Vec::with_capacity(tokens.len());

    for (idx, token) in tokens.iter().enumerate() {
        let description = describe_token(token, idx, last);
        lines.push(((*token).to_string(), description));
    }

    lines
}

fn describe_token(token: &str, idx: usize, last: usize) -> String {
    if token == "nmap" && idx == 0 {
        return "Network exploration tool".to_string();
    }

    if let Some(entry) = catalog::scan_type_for_flag(token) {
        return entry.name.to_string();
    }
    if let Some(entry) = catalog::timing_for_flag(token) {
        return format!("Timing template: {}", entry.name);
    }
    if let Some(entry) = catalog::detection_for_flag(token) {
        return entry.name.to_string();
    }
    if token.starts_with("-o")
        && let Some(entry) = catalog::output_for_flag(token)
    {
        return entry.name.to_string();
    }
    if let Some(description) = catalog::misc_description(token) {
        return description.to_string();
    }

    if token.starts_with("-p") || token == "--top-ports" || token == "-F" {
        return "Port specification".to_string();
    }
    if token.starts_with("--script") {
        return "NSE script selection".to_string();
    }

    if idx == last {
        return "Target specification".to_string();
    }
    if token.starts_with('-') {
        return "NMAP option".to_string();
    }

    // 앞 플래그의 값 토큰(포트 수, 파일 이름 등).
    "Option value".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parts() -> CommandParts {
        CommandParts {
            scan_type: Some("-sS".to_string()),
            ports: Some("-F".to_string()),
            timing: Some("-T4".to_string()),
            detection: vec!["-sV".to_string(), "-O".to_string()],
            output: None,
            misc: vec!["-Pn".to_string()],
            target: "192.168.1.1".to_string(),
        }
    }

    #[test]
    fn render_orders_slots_with_target_last() {
        assert_eq!(sample_parts().render(), "nmap -sS -F -T4 -sV -O -Pn 192.168.1.1");
    }

    #[test]
    fn render_skips_empty_slots() {
        let parts = CommandParts {
            scan_type: Some("-sn".to_string()),
            target: "10.0.0.0/24".to_string(),
            ..Default::default()
        };
        assert_eq!(parts.render(), "nmap -sn 10.0.0.0/24");
    }

    #[test]
    fn validate_rejects_missing_target() {
        let parts = CommandParts::default();
        assert!(parts.validate().is_err());
    }

    #[test]
    fn validate_rejects_ports_on_discovery_scan() {
        let parts = CommandParts {
            scan_type: Some("-sn".to_string()),
            ports: Some("-p 80".to_string()),
            target: "example.com".to_string(),
            ..Default::default()
        };
        let err = parts.validate().unwrap_err().to_string();
        assert!(err.contains("-sn"));

        let ok = CommandParts {
            scan_type: Some("-sS".to_string()),
            ports: Some("-p 80".to_string()),
            target: "example.com".to_string(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn split_command_separates_program_and_args() {
        let (program, args) = split_command("nmap -sS -p 80 example.com").unwrap();
        assert_eq!(program, "nmap");
        assert_eq!(args, vec!["-sS", "-p", "80", "example.com"]);
        assert!(split_command("   ").is_none());
    }

    #[test]
    fn explain_labels_known_tokens() {
        let lines = explain("nmap -sS -T4 -oX scan.xml 192.168.1.1");
        assert_eq!(lines[0].1, "Network exploration tool");
        assert_eq!(lines[1].1, "TCP SYN Scan");
        assert_eq!(lines[2].1, "Timing template: Aggressive");
        assert_eq!(lines[3].1, "XML Output");
        assert_eq!(lines[4].1, "Option value");
        assert_eq!(lines[5].1, "Target specification");
    }
}
