//! Small string and collection helpers shared by the commands

use crate::reporter::Reporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::Duration;

/// `[a, b, c]` with entries sorted shortest first, then lexically
pub fn slice_to_string(values: &[String]) -> String {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    format!("[{}]", sorted.join(", "))
}

/// A literal `""` typed at a prompt means "empty"
pub fn handle_escaped_empty_string(input: &str) -> String {
    if input == "\"\"" {
        String::new()
    } else {
        input.to_string()
    }
}

pub fn handle_empty_string_on_slice(values: &[String]) -> Vec<String> {
    values.iter().filter(|v| !v.is_empty()).cloned().collect()
}

/// Comma-separated `key<sep>value` pairs into a map, trimming whitespace
///
/// Returns `None` when a pair is missing the separator.
pub fn parse_key_value_pairs(input: &str, separator: char) -> Option<BTreeMap<String, String>> {
    let mut pairs = BTreeMap::new();
    if input.trim().is_empty() {
        return Some(pairs);
    }
    for pair in input.split(',') {
        let (key, value) = pair.split_once(separator)?;
        pairs.insert(key.trim().to_string(), value.trim().to_string());
    }
    Some(pairs)
}

/// Spinner shown only when output goes to a terminal
pub fn spinner(reporter: &Reporter, message: &str) -> Option<ProgressBar> {
    if !reporter.is_terminal() {
        return None;
    }
    reporter.info(message);
    let spin = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spin.set_style(style);
    }
    spin.enable_steady_tick(Duration::from_millis(100));
    Some(spin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_to_string_sorts_short_first() {
        let values = vec!["us-east-1b".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(slice_to_string(&values), "[a, b, us-east-1b]");
        assert_eq!(slice_to_string(&[]), "[]");
    }

    #[test]
    fn test_handle_escaped_empty_string() {
        assert_eq!(handle_escaped_empty_string("\"\""), "");
        assert_eq!(handle_escaped_empty_string("value"), "value");
    }

    #[test]
    fn test_handle_empty_string_on_slice() {
        let values = vec!["".to_string(), "sg-1".to_string(), "".to_string()];
        assert_eq!(handle_empty_string_on_slice(&values), vec!["sg-1"]);
    }

    #[test]
    fn test_parse_key_value_pairs() {
        let pairs = parse_key_value_pairs(" foo = bar ,baz=qux", '=').unwrap();
        assert_eq!(pairs.get("foo").map(String::as_str), Some("bar"));
        assert_eq!(pairs.get("baz").map(String::as_str), Some("qux"));

        assert!(parse_key_value_pairs("", '=').unwrap().is_empty());
        assert!(parse_key_value_pairs("foo", '=').is_none());
    }

    #[test]
    fn test_spinner_hidden_off_terminal() {
        let reporter = Reporter::new_capture();

        assert!(spinner(&reporter, "Deleting").is_none());
        assert!(reporter.captured().is_empty());
    }
}
