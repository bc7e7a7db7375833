use std::time::Duration;

pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Duration cannot be empty.".to_owned());
    }
    let split_at = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split_at);
    let value: u64 = digits
        .parse()
        .map_err(|err| format!("Invalid duration '{}': {}", s, err))?;
    match unit.trim() {
        "ms" => Ok(Duration::from_millis(value)),
        "" | "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value.saturating_mul(60))),
        "h" => Ok(Duration::from_secs(value.saturating_mul(3600))),
        other => Err(format!(
            "Invalid duration unit '{}' (expected ms, s, m, or h).",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_durations() -> Result<(), String> {
        assert_eq!(parse_duration_arg("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration_arg("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration_arg("10")?, Duration::from_secs(10));
        assert_eq!(parse_duration_arg("2m")?, Duration::from_secs(120));
        assert_eq!(parse_duration_arg("1h")?, Duration::from_secs(3600));
        Ok(())
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_duration_arg("").is_err());
        assert!(parse_duration_arg("abc").is_err());
        assert!(parse_duration_arg("10x").is_err());
    }
}
