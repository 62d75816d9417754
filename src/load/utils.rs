use tracing::debug;

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a measurement cell. Empty, non-numeric and NaN cells are all "missing".
pub fn parse_measure(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => None,
        Err(_) => {
            debug!(cell, "non-numeric measurement treated as missing");
            None
        }
    }
}

/// A cell counts as present when it holds anything but whitespace.
pub fn is_present(cell: &str) -> bool {
    !cell.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_str_strips_quotes_and_whitespace() {
        assert_eq!(clean_str("  \"Country Code\" "), "Country Code");
        assert_eq!(clean_str("1960"), "1960");
        assert_eq!(clean_str("\""), "\"");
    }

    #[test]
    fn parse_measure_treats_blanks_and_junk_as_missing() {
        assert_eq!(parse_measure("54211.0"), Some(54211.0));
        assert_eq!(parse_measure(" 4.82 "), Some(4.82));
        assert_eq!(parse_measure(""), None);
        assert_eq!(parse_measure(".."), None);
        assert_eq!(parse_measure("NaN"), None);
    }
}
