//! Input shape checks

use std::sync::OnceLock;

fn email_pattern() -> Option<&'static regex_lite::Regex> {
    static RE: OnceLock<Option<regex_lite::Regex>> = OnceLock::new();
    RE.get_or_init(|| regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Loose `local@domain.tld` shape check. Not RFC 5322.
pub fn validate_email(value: &str) -> bool {
    email_pattern().map(|re| re.is_match(value)).unwrap_or(false)
}

/// True when `value` parses as an absolute URL.
pub fn validate_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("qa.lead@veritas.example.org"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://x.com"));
        assert!(validate_url("http://localhost:8874/api"));
        assert!(!validate_url("not a url"));
        assert!(!validate_url("/relative/path"));
    }
}
