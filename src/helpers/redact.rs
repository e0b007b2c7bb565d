const VISIBLE_PREFIX_LEN: usize = 6;
const FULLY_REDACTED_MAX_LEN: usize = 8;

/// Redact a credential for log and debug output.
///
/// Empty stays empty, short values are hidden entirely, longer values keep
/// a short prefix so two tokens can still be told apart.
pub fn redact(value: &str) -> String {
    let len = value.chars().count();
    match len {
        0 => String::new(),
        1..=FULLY_REDACTED_MAX_LEN => "[redacted]".to_owned(),
        _ => {
            let prefix: String = value.chars().take(VISIBLE_PREFIX_LEN).collect();
            format!("{}...[redacted]", prefix)
        }
    }
}

pub fn redact_opt(value: Option<&str>) -> Option<String> {
    value.map(redact)
}
