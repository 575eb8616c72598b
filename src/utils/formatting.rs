//! Formatting utilities used for CLI outputs.

/// Show only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let n = key.chars().count();
    if n == 0 {
        return String::new();
    }
    if n <= 4 {
        return "*".repeat(n);
    }
    let tail: String = key.chars().skip(n - 4).collect();
    format!("{}{}", "*".repeat(n - 4), tail)
}

/// `a, b, c` or `-` for an empty list.
pub fn format_contacts(contacts: &[String]) -> String {
    if contacts.is_empty() {
        "-".to_string()
    } else {
        contacts.join(", ")
    }
}

/// Cut to `max` characters, ending with `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "--".into())
}

/// `completed/total (pct%)`
pub fn format_progress(completed: i64, total: i64) -> String {
    let pct = if total > 0 {
        (completed as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    format!("{}/{} ({:.0}%)", completed, total, pct)
}
