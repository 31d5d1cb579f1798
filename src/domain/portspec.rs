//! 커스텀 포트 지정(-p) 플래그 빌더.
//! 잘못된 입력은 재프롬프트용 메시지로 돌려준다.

/// 단일 포트 입력을 `-p N` 플래그로 만든다.
pub fn single_flag(input: &str) -> Result<String, String> {
    let port = parse_port(input)?;
    Ok(format!("-p {port}"))
}

/// 시작/끝 포트 입력을 `-p START-END` 플래그로 만든다.
pub fn range_flag(start: &str, end: &str) -> Result<String, String> {
    let start = parse_port(start)?;
    let end = parse_port(end)?;
    if start > end {
        return Err(format!("start port {start} is greater than end port {end}"));
    }
    Ok(format!("-p {start}-{end}"))
}

/// 쉼표 구분 포트 목록을 `-p a,b,c` 플래그로 만든다.
pub fn list_flag(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("port list cannot be empty".to_string());
    }

    let mut ports = Vec::new();
    for part in trimmed.split(',') {
        ports.push(parse_port(part)?.to_string());
    }

    Ok(format!("-p {}", ports.join(",")))
}

fn parse_port(input: &str) -> Result<u16, String> {
    let trimmed = input.trim();
    let port: u16 = trimmed
        .parse()
        .map_err(|_| format!("invalid port number: {trimmed}"))?;
    if port == 0 {
        return Err("port must be between 1 and 65535".to_string());
    }
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_single_port_flag() {
        assert_eq!(single_flag("443").unwrap(), "-p 443");
        assert!(single_flag("0").is_err());
        assert!(single_flag("65536").is_err());
        assert!(single_flag("http").is_err());
    }

    #[test]
    fn builds_range_flag() {
        assert_eq!(range_flag("1", "1024").unwrap(), "-p 1-1024");
        assert!(range_flag("100", "50").is_err());
        assert!(range_flag("1", "0").is_err());
    }

    #[test]
    fn builds_list_flag_with_normalized_spacing() {
        assert_eq!(list_flag("80, 443 ,8080").unwrap(), "-p 80,443,8080");
        assert!(list_flag("").is_err());
        assert!(list_flag("80,,443").is_err());
        assert!(list_flag("80,99999").is_err());
    }
}
