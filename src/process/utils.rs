/// Trim surrounding whitespace from a raw cell.
pub fn clean_str(raw: &str) -> String {
    raw.trim().to_string()
}

/// Normalize a header: trim, lowercase, spaces and hyphens become underscores.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Parse a cleaned cell as a finite number. Anything else counts as missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
