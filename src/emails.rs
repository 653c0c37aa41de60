use once_cell::sync::Lazy;
use regex::Regex;

/// Longest address accepted (RFC 5321 path limit minus the angle brackets).
pub const MAX_EMAIL_LEN: usize = 254;
/// Longest local part accepted.
pub const MAX_LOCAL_LEN: usize = 64;
/// Longest domain accepted.
pub const MAX_DOMAIN_LEN: usize = 253;

static LOCAL_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{Nd}._+\-]+$").expect("static local-part regex"));

static DOMAIN_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{Nd}\-]+$").expect("static label regex"));

/// Syntax-only validation applied to every generated candidate.
///
/// Rules:
/// - at most 254 bytes overall and exactly one `@`
/// - local part of 1..=64 bytes made of letters, digits, `.`, `_`, `-`, `+`
/// - domain of 1..=253 bytes, no leading/trailing dot, at least two labels,
///   every label non-empty and made of letters, digits or `-`
pub fn is_valid_email_format(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > MAX_LOCAL_LEN || !LOCAL_PART_RE.is_match(local) {
        return false;
    }

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels
        .iter()
        .all(|label| !label.is_empty() && DOMAIN_LABEL_RE.is_match(label))
}

/// Canonicalization used for names, domains and lookups (trim + lowercase).
pub fn canonical(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        let cases = [
            ("john.doe@example.com", true),
            ("john123@example.com", true),
            ("john_doe@example.com", true),
            ("john-doe@example.com", true),
            ("john+tag@example.co.uk", true),
            ("johndoeexample.com", false),
            ("john@", false),
            ("@example.com", false),
            ("", false),
            ("john@example", false),
            ("john@.example.com", false),
            ("john@example.com.", false),
            ("john@exa..mple.com", false),
            ("john doe@example.com", false),
            ("john@exa_mple.com", false),
            ("a@b@example.com", false),
        ];
        for (email, expected) in cases {
            assert_eq!(is_valid_email_format(email), expected, "{email}");
        }
    }

    #[test]
    fn test_length_limits() {
        let local = "a".repeat(MAX_LOCAL_LEN);
        assert!(is_valid_email_format(&format!("{local}@example.com")));
        let too_long = "a".repeat(MAX_LOCAL_LEN + 1);
        assert!(!is_valid_email_format(&format!("{too_long}@example.com")));
    }

    #[test]
    fn test_unicode_letters_accepted() {
        assert!(is_valid_email_format("josé.garcía@example.com"));
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical("  John "), "john");
        assert_eq!(canonical("ACME.io"), "acme.io");
    }
}
