//! 대상(target) 입력을 nmap 대상 형태로 분류/검증하는 모듈.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::{Result, bail};

/// nmap이 받는 대상 표기 형태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// 단일 IP: 192.168.1.1
    Ip(String),
    /// 마지막 옥텟 범위: 192.168.1.1-254
    Range(String),
    /// CIDR: 192.168.1.0/24
    Cidr(String),
    /// 호스트 이름: example.com
    Hostname(String),
    /// 쉼표 구분 복수 대상
    List(Vec<String>),
    /// 대상 목록 파일: -iL targets.txt
    InputFile(String),
}

// 명령은 셸 없이 argv로 실행되지만, 히스토리/스크립트에 남는 문자열이
// 붙여넣기만으로 안전하도록 셸 메타문자는 입력 단계에서 거부한다.
const FORBIDDEN: &[char] = &[
    ';', '|', '&', '$', '`', '>', '<', '(', ')', '{', '}', '\'', '"', '\\',
];

/// 입력에 셸 메타문자가 섞여 있으면 해당 문자를 돌려준다.
pub fn contains_shell_metacharacter(value: &str) -> Option<char> {
    value.chars().find(|c| FORBIDDEN.contains(c))
}

impl TargetSpec {
    /// 입력 문자열을 보고 대상 형태를 자동 감지한다.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            bail!("target cannot be empty");
        }

        if let Some(forbidden) = contains_shell_metacharacter(trimmed) {
            bail!("target contains forbidden character '{forbidden}'");
        }

        if let Some(path) = trimmed.strip_prefix("-iL") {
            let path = path.trim();
            if path.is_empty() {
                bail!("-iL requires a file path");
            }
            return Ok(Self::InputFile(path.to_string()));
        }

        if trimmed.starts_with('-') {
            bail!("target looks like a flag: {trimmed}");
        }

        if trimmed.contains(',') {
            let mut items = Vec::new();
            for part in trimmed.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    bail!("target list contains an empty entry");
                }
                // 목록 항목은 개별적으로 재검증한다(중첩 목록/-iL 금지).
                match Self::parse(part)? {
                    Self::List(_) | Self::InputFile(_) => {
                        bail!("invalid target list entry: {part}")
                    }
                    _ => items.push(part.to_string()),
                }
            }
            return Ok(Self::List(items));
        }

        if trimmed.contains(' ') {
            bail!("target cannot contain spaces: {trimmed}");
        }

        if trimmed.parse::<IpAddr>().is_ok() {
            return Ok(Self::Ip(trimmed.to_string()));
        }

        if let Some((base, prefix)) = trimmed.split_once('/') {
            let Ok(base_ip) = base.parse::<IpAddr>() else {
                bail!("invalid CIDR base address: {base}");
            };
            let Ok(bits) = prefix.parse::<u8>() else {
                bail!("invalid CIDR prefix: {prefix}");
            };
            let max_bits = if base_ip.is_ipv4() { 32 } else { 128 };
            if bits > max_bits {
                bail!("CIDR prefix /{bits} exceeds /{max_bits}");
            }
            return Ok(Self::Cidr(trimmed.to_string()));
        }

        if let Some((base, end)) = trimmed.rsplit_once('-')
            && base.parse::<Ipv4Addr>().is_ok()
        {
            let Ok(last) = end.parse::<u16>() else {
                bail!("invalid range end: {end}");
            };
            if last == 0 || last > 255 {
                bail!("range end must be 1-255: {last}");
            }
            return Ok(Self::Range(trimmed.to_string()));
        }

        if is_valid_hostname(trimmed) {
            return Ok(Self::Hostname(trimmed.to_string()));
        }

        bail!("unsupported target format: {trimmed}")
    }

    /// 실시간 힌트/로그에 쓰는 형태 이름.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ip(_) => "IP address",
            Self::Range(_) => "IP range",
            Self::Cidr(_) => "CIDR network",
            Self::Hostname(_) => "hostname",
            Self::List(_) => "target list",
            Self::InputFile(_) => "input file",
        }
    }
}

fn is_valid_hostname(value: &str) -> bool {
    if value.len() > 253 || !value.chars().any(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    value.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_documented_target_forms() {
        assert_eq!(
            TargetSpec::parse("192.168.1.1").unwrap(),
            TargetSpec::Ip("192.168.1.1".to_string())
        );
        assert_eq!(
            TargetSpec::parse("192.168.1.1-254").unwrap(),
            TargetSpec::Range("192.168.1.1-254".to_string())
        );
        assert_eq!(
            TargetSpec::parse("192.168.1.0/24").unwrap(),
            TargetSpec::Cidr("192.168.1.0/24".to_string())
        );
        assert_eq!(
            TargetSpec::parse("example.com").unwrap(),
            TargetSpec::Hostname("example.com".to_string())
        );
        assert_eq!(
            TargetSpec::parse("-iL targets.txt").unwrap(),
            TargetSpec::InputFile("targets.txt".to_string())
        );
    }

    #[test]
    fn detects_comma_separated_list() {
        let spec = TargetSpec::parse("192.168.1.1,192.168.1.2,example.com").unwrap();
        assert_eq!(
            spec,
            TargetSpec::List(vec![
                "192.168.1.1".to_string(),
                "192.168.1.2".to_string(),
                "example.com".to_string(),
            ])
        );
    }

    #[test]
    fn hostname_with_hyphen_is_not_a_range() {
        assert_eq!(
            TargetSpec::parse("my-host.example.com").unwrap().kind(),
            "hostname"
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(TargetSpec::parse("").is_err());
        assert!(TargetSpec::parse("   ").is_err());
        assert!(TargetSpec::parse("--script=vuln").is_err());
        assert!(TargetSpec::parse("192.168.1.0/33").is_err());
        assert!(TargetSpec::parse("192.168.1.1-0").is_err());
        assert!(TargetSpec::parse("a,,b").is_err());
    }

    #[test]
    fn rejects_shell_metacharacters() {
        assert!(TargetSpec::parse("example.com;reboot").is_err());
        assert!(TargetSpec::parse("$(whoami)").is_err());
        assert!(TargetSpec::parse("host|tee").is_err());
    }
}
