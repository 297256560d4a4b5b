//! Trove classifier parsing
//!
//! Runtime versions are read from lines of exactly the form
//! `Programming Language :: <language> :: <value>`. Longer lines such as
//! `Programming Language :: Python :: 3 :: Only` and unrelated categories are
//! skipped.

const SEPARATOR: &str = "::";
const LANGUAGE_CATEGORY: &str = "Programming Language";

/// Extract runtime-version tokens (e.g. "3.8", "3") from classifiers
pub fn extract_runtime_versions<S: AsRef<str>>(classifiers: &[S]) -> Vec<String> {
    classifiers
        .iter()
        .filter_map(|line| runtime_token(line.as_ref()))
        .map(str::to_string)
        .collect()
}

fn runtime_token(line: &str) -> Option<&str> {
    let segments: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
    match segments.as_slice() {
        [category, _, value] if *category == LANGUAGE_CATEGORY && !value.is_empty() => {
            Some(*value)
        }
        _ => None,
    }
}

/// Whether extracted tokens list `version` itself
pub fn lists_version(tokens: &[String], version: &str) -> bool {
    tokens.iter().any(|t| t == version)
}
