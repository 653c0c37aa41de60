//! Candidate address generation.
//!
//! Produces a fixed, deterministic, priority-ordered list of likely email
//! addresses for a person at a domain: 20 base patterns, then numbered
//! variants for the digits 0-9, then numbered variants for 1-50. Entries that
//! fail the format check or repeat an earlier address are dropped; the first
//! occurrence keeps its place.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::emails::{canonical, is_valid_email_format};

/// One generated, not-yet-verified email guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAddress {
    pub email: String,
    /// Pattern name such as `firstname.lastname` or `f.lastname7`.
    pub pattern_tag: String,
    /// Position in the generator output; fixes verification and report order.
    pub ordinal: usize,
}

/// Name parts a pattern is built from.
struct NameParts<'a> {
    first: &'a str,
    last: &'a str,
    f: &'a str,
    l: &'a str,
}

/// Digits appended in the first numbered pass.
const DIGIT_SUFFIXES: std::ops::RangeInclusive<u32> = 0..=9;
/// Integers appended in the second numbered pass.
const NUMBER_SUFFIXES: std::ops::RangeInclusive<u32> = 1..=50;

/// Base patterns, highest priority first.
fn base_patterns(n: &NameParts<'_>) -> [(&'static str, String); 20] {
    let NameParts { first, last, f, l } = n;
    [
        ("firstname.lastname", format!("{first}.{last}")),
        ("firstnamelastname", format!("{first}{last}")),
        ("f.lastname", format!("{f}.{last}")),
        ("flastname", format!("{f}{last}")),
        ("firstname.l", format!("{first}.{l}")),
        ("firstnamel", format!("{first}{l}")),
        ("firstname", first.to_string()),
        ("lastname", last.to_string()),
        ("lastname.firstname", format!("{last}.{first}")),
        ("lastnamefirstname", format!("{last}{first}")),
        ("l.firstname", format!("{l}.{first}")),
        ("lfirstname", format!("{l}{first}")),
        ("f_lastname", format!("{f}_{last}")),
        ("firstname_lastname", format!("{first}_{last}")),
        ("lastname_firstname", format!("{last}_{first}")),
        ("fl", format!("{f}{l}")),
        ("firstname.f.lastname", format!("{first}.{f}.{last}")),
        ("lastname.f", format!("{last}.{f}")),
        ("f.firstname.lastname", format!("{f}.{first}.{last}")),
        ("firstname-lastname", format!("{first}-{last}")),
    ]
}

/// Patterns that also get a numeric suffix.
fn numbered_patterns(n: &NameParts<'_>, suffix: u32) -> [(String, String); 3] {
    let NameParts { first, last, f, .. } = n;
    [
        (
            format!("firstname.lastname{suffix}"),
            format!("{first}.{last}{suffix}"),
        ),
        (
            format!("firstnamelastname{suffix}"),
            format!("{first}{last}{suffix}"),
        ),
        (format!("f.lastname{suffix}"), format!("{f}.{last}{suffix}")),
    ]
}

/// Generate the ordered, deduplicated candidate list for a person at `domain`.
///
/// Inputs are trimmed and lowercased. Returns an empty list when any input is
/// empty after normalization.
pub fn generate(first_name: &str, last_name: &str, domain: &str) -> Vec<CandidateAddress> {
    let first = canonical(first_name);
    let last = canonical(last_name);
    let domain = canonical(domain);

    if first.is_empty() || last.is_empty() || domain.is_empty() {
        return Vec::new();
    }

    let parts = NameParts {
        first: &first,
        last: &last,
        f: first_char(&first),
        l: first_char(&last),
    };

    let base = base_patterns(&parts)
        .into_iter()
        .map(|(tag, local)| (tag.to_string(), local));
    let numbered = DIGIT_SUFFIXES
        .chain(NUMBER_SUFFIXES)
        .flat_map(|suffix| numbered_patterns(&parts, suffix));

    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<CandidateAddress> = Vec::new();
    for (pattern_tag, local) in base.chain(numbered) {
        let email = format!("{local}@{domain}");
        if !is_valid_email_format(&email) || !seen.insert(email.clone()) {
            continue;
        }
        out.push(CandidateAddress {
            email,
            pattern_tag,
            ordinal: out.len(),
        });
    }
    out
}

/// First character of a non-empty string, as a slice.
fn first_char(s: &str) -> &str {
    s.char_indices()
        .nth(1)
        .map(|(idx, _)| &s[..idx])
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(list: &[CandidateAddress]) -> Vec<&str> {
        list.iter().map(|c| c.email.as_str()).collect()
    }

    #[test]
    fn test_base_order() {
        let list = generate("John", "Doe", "example.com");
        let head: Vec<&str> = emails(&list).into_iter().take(6).collect();
        assert_eq!(
            head,
            vec![
                "john.doe@example.com",
                "johndoe@example.com",
                "j.doe@example.com",
                "jdoe@example.com",
                "john.d@example.com",
                "johnd@example.com",
            ]
        );
        assert_eq!(list[0].pattern_tag, "firstname.lastname");
        assert_eq!(list[15].email, "jd@example.com");
        assert_eq!(list[15].pattern_tag, "fl");
        assert_eq!(list[19].email, "john-doe@example.com");
    }

    #[test]
    fn test_numbered_variants_follow_base() {
        let list = generate("john", "doe", "example.com");
        assert_eq!(list[20].email, "john.doe0@example.com");
        assert_eq!(list[20].pattern_tag, "firstname.lastname0");
        assert_eq!(list[21].email, "johndoe0@example.com");
        assert_eq!(list[22].email, "j.doe0@example.com");
        // 1-9 from the second pass repeat the digit pass; 10 is the first new one.
        assert_eq!(list[50].email, "john.doe10@example.com");
        assert_eq!(list.last().unwrap().email, "j.doe50@example.com");
        assert_eq!(list.len(), 173);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            generate("Ada", "Lovelace", "acme.io"),
            generate("Ada", "Lovelace", "acme.io")
        );
    }

    #[test]
    fn test_no_duplicates_and_valid() {
        for (f, l) in [("john", "doe"), ("j", "doe"), ("ann", "a"), ("x", "y")] {
            let list = generate(f, l, "example.com");
            let unique: HashSet<&str> = emails(&list).into_iter().collect();
            assert_eq!(unique.len(), list.len(), "{f} {l}");
            assert!(list.iter().all(|c| is_valid_email_format(&c.email)));
        }
    }

    #[test]
    fn test_ordinals_are_positions() {
        let list = generate("j", "doe", "example.com");
        for (idx, c) in list.iter().enumerate() {
            assert_eq!(c.ordinal, idx);
        }
        // "j.doe" is produced by firstname.lastname first; f.lastname is dropped.
        assert_eq!(list[0].email, "j.doe@example.com");
        assert_eq!(list[0].pattern_tag, "firstname.lastname");
        assert!(!list.iter().any(|c| c.pattern_tag == "f.lastname"));
    }

    #[test]
    fn test_normalization_and_empty_inputs() {
        let list = generate("  JOHN ", "Doe", " Example.COM ");
        assert_eq!(list[0].email, "john.doe@example.com");
        assert!(generate("", "doe", "example.com").is_empty());
        assert!(generate("john", "   ", "example.com").is_empty());
        assert!(generate("john", "doe", "").is_empty());
    }

    #[test]
    fn test_invalid_characters_dropped() {
        assert!(generate("!!!", "???", "example.com").is_empty());
        // A space in a name invalidates every pattern that embeds it.
        let list = generate("mary ann", "lee", "example.com");
        assert!(list.iter().all(|c| !c.email.contains(' ')));
        assert!(list.iter().any(|c| c.email == "m.lee@example.com"));
    }

    #[test]
    fn test_unicode_initial() {
        let list = generate("Élodie", "Durand", "example.fr");
        assert_eq!(list[2].email, "é.durand@example.fr");
    }
}
