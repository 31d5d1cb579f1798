//! nmap 플래그 카탈로그.
//! 마법사가 보여주는 모든 메뉴 항목을 정적 테이블로 관리한다.
//! 플래그 의미는 재구현하지 않는다. nmap 문서 기준의 표면만 기술한다.

/// 이름/플래그/설명을 갖는 공통 카탈로그 항목.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub flag: &'static str,
    pub description: &'static str,
}

pub const SCAN_TYPES: [CatalogEntry; 12] = [
    CatalogEntry {
        name: "TCP SYN Scan",
        flag: "-sS",
        description: "Half-open scan, stealthy and fast",
    },
    CatalogEntry {
        name: "TCP Connect Scan",
        flag: "-sT",
        description: "Full TCP connection, works without root",
    },
    CatalogEntry {
        name: "UDP Scan",
        flag: "-sU",
        description: "Scan UDP ports (slower)",
    },
    CatalogEntry {
        name: "TCP ACK Scan",
        flag: "-sA",
        description: "Firewall rule detection",
    },
    CatalogEntry {
        name: "TCP Window Scan",
        flag: "-sW",
        description: "Window size exploitation",
    },
    CatalogEntry {
        name: "TCP Maimon Scan",
        flag: "-sM",
        description: "FIN/ACK probe",
    },
    CatalogEntry {
        name: "TCP Null Scan",
        flag: "-sN",
        description: "No flags set (stealth)",
    },
    CatalogEntry {
        name: "TCP FIN Scan",
        flag: "-sF",
        description: "FIN flag only (stealth)",
    },
    CatalogEntry {
        name: "TCP Xmas Scan",
        flag: "-sX",
        description: "FIN, PSH, URG flags (stealth)",
    },
    CatalogEntry {
        name: "Ping Scan",
        flag: "-sn",
        description: "Host discovery only",
    },
    CatalogEntry {
        name: "List Scan",
        flag: "-sL",
        description: "List targets without scanning",
    },
    CatalogEntry {
        name: "Version Detection",
        flag: "-sV",
        description: "Service version detection",
    },
];

pub const TIMING_TEMPLATES: [CatalogEntry; 6] = [
    CatalogEntry {
        name: "Paranoid",
        flag: "-T0",
        description: "Very slow, IDS evasion",
    },
    CatalogEntry {
        name: "Sneaky",
        flag: "-T1",
        description: "Slow, IDS evasion",
    },
    CatalogEntry {
        name: "Polite",
        flag: "-T2",
        description: "Slow, less bandwidth",
    },
    CatalogEntry {
        name: "Normal",
        flag: "-T3",
        description: "Default timing",
    },
    CatalogEntry {
        name: "Aggressive",
        flag: "-T4",
        description: "Fast, assume fast network",
    },
    CatalogEntry {
        name: "Insane",
        flag: "-T5",
        description: "Very fast, may miss results",
    },
];

/// 탐지/스크립트 옵션. 마지막 항목은 스크립트 이름을 추가 입력받는 커스텀 항목이다.
pub const DETECTION_OPTIONS: [CatalogEntry; 9] = [
    CatalogEntry {
        name: "Service Version Detection",
        flag: "-sV",
        description: "Detect service versions",
    },
    CatalogEntry {
        name: "OS Detection",
        flag: "-O",
        description: "Enable OS detection",
    },
    CatalogEntry {
        name: "Script Scan (Default)",
        flag: "-sC",
        description: "Run default NSE scripts",
    },
    CatalogEntry {
        name: "Script Scan (All)",
        flag: "--script=all",
        description: "Run all NSE scripts",
    },
    CatalogEntry {
        name: "Script Scan (Vuln)",
        flag: "--script=vuln",
        description: "Run vulnerability scripts",
    },
    CatalogEntry {
        name: "Script Scan (Auth)",
        flag: "--script=auth",
        description: "Run authentication scripts",
    },
    CatalogEntry {
        name: "Script Scan (Discovery)",
        flag: "--script=discovery",
        description: "Run discovery scripts",
    },
    CatalogEntry {
        name: "Aggressive Scan",
        flag: "-A",
        description: "OS detection, version detection, script scanning",
    },
    CatalogEntry {
        name: "Custom Script",
        flag: "--script=",
        description: "Specify custom NSE script",
    },
];

/// `DETECTION_OPTIONS`에서 커스텀 스크립트 항목의 1-based 메뉴 번호.
pub const CUSTOM_SCRIPT_CHOICE: usize = 9;

/// 출력 포맷. `ext`가 비어 있으면 nmap이 확장자를 스스로 결정한다(-oA).
#[derive(Debug, Clone, Copy)]
pub struct OutputFormat {
    pub name: &'static str,
    pub flag: &'static str,
    pub ext: &'static str,
}

pub const OUTPUT_FORMATS: [OutputFormat; 5] = [
    OutputFormat {
        name: "Normal Output",
        flag: "-oN",
        ext: ".nmap",
    },
    OutputFormat {
        name: "XML Output",
        flag: "-oX",
        ext: ".xml",
    },
    OutputFormat {
        name: "Greppable Output",
        flag: "-oG",
        ext: ".gnmap",
    },
    OutputFormat {
        name: "All Formats",
        flag: "-oA",
        ext: "",
    },
    OutputFormat {
        name: "Script Kiddie",
        flag: "-oS",
        ext: ".skid",
    },
];

/// 포트 프리셋 선택 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortChoice {
    /// 플래그 없이 nmap 기본 포트 선택을 쓴다.
    Default,
    /// 고정 플래그 문자열을 그대로 쓴다.
    Flag(&'static str),
    /// 시작/끝 포트를 추가 입력받는다.
    CustomRange,
    /// 쉼표 구분 포트 목록을 추가 입력받는다.
    CustomList,
    /// 단일 포트를 추가 입력받는다.
    CustomSingle,
}

#[derive(Debug, Clone, Copy)]
pub struct PortPreset {
    pub name: &'static str,
    pub choice: PortChoice,
    pub description: &'static str,
}

pub const PORT_PRESETS: [PortPreset; 13] = [
    PortPreset {
        name: "Default NMAP ports",
        choice: PortChoice::Default,
        description: "NMAP default port selection (~1000 ports)",
    },
    PortPreset {
        name: "Fast scan",
        choice: PortChoice::Flag("-F"),
        description: "Top 100 most common ports",
    },
    PortPreset {
        name: "All ports",
        choice: PortChoice::Flag("-p-"),
        description: "All 65535 ports (very slow)",
    },
    PortPreset {
        name: "Top 100 ports",
        choice: PortChoice::Flag("--top-ports 100"),
        description: "Most common 100 ports",
    },
    PortPreset {
        name: "Top 1000 ports",
        choice: PortChoice::Flag("--top-ports 1000"),
        description: "Most common 1000 ports",
    },
    PortPreset {
        name: "Well-known ports",
        choice: PortChoice::Flag("-p 1-1023"),
        description: "System/well-known ports (1-1023)",
    },
    PortPreset {
        name: "Common web ports",
        choice: PortChoice::Flag("-p 80,443,8080,8443,8000,8888"),
        description: "HTTP/HTTPS and common web ports",
    },
    PortPreset {
        name: "Common service ports",
        choice: PortChoice::Flag("-p 21,22,23,25,53,80,110,143,443,993,995"),
        description: "FTP, SSH, Telnet, SMTP, DNS, HTTP, POP, IMAP, HTTPS",
    },
    PortPreset {
        name: "Database ports",
        choice: PortChoice::Flag("-p 1433,1521,3306,5432,27017"),
        description: "MSSQL, Oracle, MySQL, PostgreSQL, MongoDB",
    },
    PortPreset {
        name: "Remote access ports",
        choice: PortChoice::Flag("-p 22,23,3389,5900,5901,5902"),
        description: "SSH, Telnet, RDP, VNC",
    },
    PortPreset {
        name: "Custom port range",
        choice: PortChoice::CustomRange,
        description: "Specify your own port range",
    },
    PortPreset {
        name: "Custom port list",
        choice: PortChoice::CustomList,
        description: "Specify individual ports",
    },
    PortPreset {
        name: "Single port",
        choice: PortChoice::CustomSingle,
        description: "Specify a single port",
    },
];

/// 문서화된 추가 옵션 목록(자유 입력 단계의 안내용).
pub const MISC_OPTIONS: [(&str, &str); 8] = [
    ("-v", "Verbose output"),
    ("-vv", "Very verbose output"),
    ("-d", "Debug output"),
    ("-n", "No DNS resolution"),
    ("-R", "Always do DNS resolution"),
    ("-Pn", "Skip host discovery"),
    ("-6", "IPv6 scanning"),
    ("--reason", "Show reason for port state"),
];

/// 자주 쓰는 스캔 조합 템플릿. `{target}` 자리에 대상이 치환된다.
#[derive(Debug, Clone, Copy)]
pub struct QuickTemplate {
    pub name: &'static str,
    pub command: &'static str,
    pub description: &'static str,
}

pub const QUICK_TEMPLATES: [QuickTemplate; 8] = [
    QuickTemplate {
        name: "Quick Host Discovery",
        command: "nmap -sn {target}",
        description: "Fast ping scan to discover live hosts",
    },
    QuickTemplate {
        name: "Fast TCP Scan",
        command: "nmap -F {target}",
        description: "Scan top 100 most common ports",
    },
    QuickTemplate {
        name: "Comprehensive Scan",
        command: "nmap -sS -sV -O -A {target}",
        description: "SYN scan with version and OS detection",
    },
    QuickTemplate {
        name: "Stealth Scan",
        command: "nmap -sS -T1 -f {target}",
        description: "Slow, fragmented SYN scan for IDS evasion",
    },
    QuickTemplate {
        name: "UDP Service Scan",
        command: "nmap -sU --top-ports 20 {target}",
        description: "Scan top 20 UDP ports",
    },
    QuickTemplate {
        name: "Vulnerability Scan",
        command: "nmap -sV --script=vuln {target}",
        description: "Version detection with vulnerability scripts",
    },
    QuickTemplate {
        name: "Web Server Scan",
        command: "nmap -p 80,443 -sV --script=http-* {target}",
        description: "Focus on web services with HTTP scripts",
    },
    QuickTemplate {
        name: "Full Port Scan",
        command: "nmap -p- -T4 {target}",
        description: "Scan all 65535 ports (aggressive timing)",
    },
];

impl QuickTemplate {
    /// `{target}` 자리 표시자를 실제 대상으로 치환한다.
    pub fn render(&self, target: &str) -> String {
        self.command.replace("{target}", target)
    }
}

/// 스캔 타입 플래그를 카탈로그 항목으로 역해석한다.
pub fn scan_type_for_flag(flag: &str) -> Option<&'static CatalogEntry> {
    SCAN_TYPES.iter().find(|entry| entry.flag == flag)
}

/// 타이밍 플래그를 카탈로그 항목으로 역해석한다.
pub fn timing_for_flag(flag: &str) -> Option<&'static CatalogEntry> {
    TIMING_TEMPLATES.iter().find(|entry| entry.flag == flag)
}

/// 탐지 옵션 플래그를 카탈로그 항목으로 역해석한다.
pub fn detection_for_flag(flag: &str) -> Option<&'static CatalogEntry> {
    DETECTION_OPTIONS.iter().find(|entry| entry.flag == flag)
}

/// 출력 포맷 플래그를 카탈로그 항목으로 역해석한다.
pub fn output_for_flag(flag: &str) -> Option<&'static OutputFormat> {
    OUTPUT_FORMATS.iter().find(|entry| entry.flag == flag)
}

/// 문서화된 misc 플래그 설명을 조회한다.
pub fn misc_description(flag: &str) -> Option<&'static str> {
    MISC_OPTIONS
        .iter()
        .find(|(known, _)| *known == flag)
        .map(|(_, description)| *description)
}

/// 1-based 메뉴 번호로 템플릿을 조회한다.
pub fn quick_template(index: usize) -> Option<&'static QuickTemplate> {
    if index == 0 {
        return None;
    }
    QUICK_TEMPLATES.get(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_render_substitutes_target() {
        let rendered = QUICK_TEMPLATES[0].render("192.168.0.0/24");
        assert_eq!(rendered, "nmap -sn 192.168.0.0/24");
    }

    #[test]
    fn quick_template_index_is_one_based() {
        assert_eq!(quick_template(1).unwrap().name, "Quick Host Discovery");
        assert_eq!(quick_template(8).unwrap().name, "Full Port Scan");
        assert!(quick_template(0).is_none());
        assert!(quick_template(9).is_none());
    }

    #[test]
    fn flag_lookups_resolve_catalog_entries() {
        assert_eq!(scan_type_for_flag("-sS").unwrap().name, "TCP SYN Scan");
        assert_eq!(timing_for_flag("-T4").unwrap().name, "Aggressive");
        assert_eq!(output_for_flag("-oX").unwrap().ext, ".xml");
        assert_eq!(misc_description("-Pn"), Some("Skip host discovery"));
        assert!(scan_type_for_flag("-sZ").is_none());
    }

    #[test]
    fn custom_script_choice_points_at_custom_entry() {
        assert_eq!(
            DETECTION_OPTIONS[CUSTOM_SCRIPT_CHOICE - 1].flag,
            "--script="
        );
    }
}
