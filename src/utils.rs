/// Escape a value for use inside a double-quoted HTML attribute
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Click-through rate as a percentage; 0 when nothing was shown
pub fn ctr(clicks: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        0.0
    } else {
        clicks as f64 / impressions as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("best-vps"), "best-vps");
        assert_eq!(escape_attribute(r#"a"b<c>&"#), "a&quot;b&lt;c&gt;&amp;");
    }

    #[test]
    fn test_ctr() {
        assert_eq!(ctr(0, 0), 0.0);
        assert_eq!(ctr(5, 0), 0.0);
        assert_eq!(ctr(1, 1), 100.0);
        assert_eq!(ctr(1, 4), 25.0);
        assert_eq!(ctr(3, 1), 300.0);
    }
}
