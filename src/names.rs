//! Schema name normalization
//!
//! Titles are free-form ("membership_invitation", "Billing Plan",
//! "GetRunResponse"); collection keys are camelCase identifiers. Splitting
//! is ASCII only so the result does not depend on locale.

use std::sync::OnceLock;

use regex::Regex;

fn delimiters() -> &'static Regex {
    static DELIMITERS: OnceLock<Regex> = OnceLock::new();
    DELIMITERS.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap())
}

/// Returns consistent name for a schema.
///
/// ```
/// use schema_collection::normalize_name;
///
/// assert_eq!(normalize_name("membership_invitation"), "membershipInvitation");
/// ```
pub fn normalize_name(title: &str) -> String {
    let mut result = String::with_capacity(title.len());

    let words = delimiters()
        .split(title)
        .filter(|chunk| !chunk.is_empty())
        .flat_map(split_humps);

    for (i, word) in words.enumerate() {
        let lower = word.to_ascii_lowercase();
        if i == 0 {
            result.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

/// Split an alphanumeric chunk at camel-case and letter/digit boundaries:
/// "getRunResponse" -> get/Run/Response, "HTMLParser" -> HTML/Parser,
/// "oauth2token" -> oauth/2/token
fn split_humps(chunk: &str) -> Vec<&str> {
    let bytes = chunk.as_bytes();
    let mut words = Vec::new();
    let mut start = 0;

    for i in 1..bytes.len() {
        let prev = bytes[i - 1];
        let cur = bytes[i];
        let next = bytes.get(i + 1).copied();

        let lower_to_upper = prev.is_ascii_lowercase() && cur.is_ascii_uppercase();
        let digit_edge = prev.is_ascii_digit() != cur.is_ascii_digit();
        let acronym_end = prev.is_ascii_uppercase()
            && cur.is_ascii_uppercase()
            && next.is_some_and(|n| n.is_ascii_lowercase());

        if lower_to_upper || digit_edge || acronym_end {
            words.push(&chunk[start..i]);
            start = i;
        }
    }
    words.push(&chunk[start..]);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(normalize_name("membership_invitation"), "membershipInvitation");
        assert_eq!(normalize_name("SCREAMING_SNAKE"), "screamingSnake");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(normalize_name("Widget"), "widget");
        assert_eq!(normalize_name("widget"), "widget");
    }

    #[test]
    fn test_mixed_delimiters() {
        assert_eq!(normalize_name("billing plan"), "billingPlan");
        assert_eq!(normalize_name("--get-run  response__"), "getRunResponse");
        assert_eq!(normalize_name("test.information"), "testInformation");
    }

    #[test]
    fn test_camel_humps() {
        assert_eq!(normalize_name("GetRunResponse"), "getRunResponse");
        assert_eq!(normalize_name("alreadyCamel"), "alreadyCamel");
        assert_eq!(normalize_name("HTMLParser"), "htmlParser");
        assert_eq!(normalize_name("v2Schema"), "v2Schema");
    }

    #[test]
    fn test_digit_boundaries() {
        assert_eq!(normalize_name("foo2bar"), "foo2Bar");
        assert_eq!(normalize_name("oauth2token"), "oauth2Token");
        assert_eq!(normalize_name("v2Schema"), "v2Schema");
        assert_eq!(normalize_name("version 2 info"), "version2Info");
        assert_eq!(normalize_name("Page10Items"), "page10Items");
    }

    #[test]
    fn test_no_words() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("__ --"), "");
    }

    #[test]
    fn test_idempotent() {
        for title in ["membership_invitation", "Billing Plan", "HTMLParser", "oauth2token"] {
            let once = normalize_name(title);
            assert_eq!(normalize_name(&once), once);
        }
    }
}
