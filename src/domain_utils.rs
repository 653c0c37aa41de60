//! Organization-name helpers used by domain resolution.
//!
//! Turns a free-form organization string into either a literal domain, a
//! normalized directory key, or an ordered list of candidate domains:
//! - "acme.io"          -> direct domain
//! - "Acme Widgets Inc" -> key "acme widgets"
//! - "Acme Widgets Inc" -> acmewidgets.com, acmewidgets.io, ..., acme.com, ...

/// Legal-form suffixes stripped during normalization. Each is tried once, in
/// this order.
pub const LEGAL_SUFFIXES: &[&str] = &[
    " inc",
    " llc",
    " ltd",
    " corp",
    " corporation",
    " limited",
    " company",
    " co",
    " inc.",
    " llc.",
    " ltd.",
    " corp.",
    " corporation.",
    " limited.",
    " company.",
    " co.",
];

/// Top-level domains tried for candidate generation, most likely first.
pub const CANDIDATE_TLDS: &[&str] = &[
    "com", "io", "co", "net", "org", "co.uk", "com.au", "ca", "de", "fr",
];

/// Whether the (already trimmed, lowercased) input is itself a domain.
///
/// No whitespace, at least two dot-separated labels and a final label of two
/// or more characters.
pub fn is_domain_like(input: &str) -> bool {
    if input.is_empty() || input.chars().any(char::is_whitespace) || !input.contains('.') {
        return false;
    }
    let parts: Vec<&str> = input.split('.').collect();
    parts.len() >= 2 && parts.last().is_some_and(|tld| tld.chars().count() >= 2)
}

/// Directory key for an organization name: trimmed, lowercased, legal suffix
/// stripped.
pub fn normalize_company_name(name: &str) -> String {
    let mut name = name.trim().to_lowercase();
    for suffix in LEGAL_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
        }
    }
    name.trim().to_string()
}

/// Normalized name restricted to ASCII lowercase letters, digits and spaces.
fn clean_with_spaces(name: &str) -> String {
    normalize_company_name(name)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}

/// Base domain token: the cleaned name with spaces removed.
pub fn clean_company_name(name: &str) -> String {
    clean_with_spaces(name).replace(' ', "")
}

/// Tokens to cross with the TLD list, base token first.
///
/// Multi-word names also contribute their first word and their first two words
/// joined. Returns an empty list when the base token is empty.
pub fn company_variations(name: &str) -> Vec<String> {
    let cleaned = clean_with_spaces(name);
    let base = cleaned.replace(' ', "");
    if base.is_empty() {
        return Vec::new();
    }

    let mut tokens = vec![base];
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() > 1 {
        tokens.push(words[0].to_string());
        tokens.push(format!("{}{}", words[0], words[1]));
    }

    let mut unique = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !unique.contains(&token) {
            unique.push(token);
        }
    }
    unique
}

/// Ordered, deduplicated candidate domains for an organization name.
pub fn candidate_domains(name: &str) -> Vec<String> {
    company_variations(name)
        .iter()
        .flat_map(|token| CANDIDATE_TLDS.iter().map(move |tld| format!("{token}.{tld}")))
        .collect()
}
