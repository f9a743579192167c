use regex::Regex;

fn absolute_url_pattern() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^https?://").expect("invalid http(s) regex"))
}

/// Determine whether a raw image reference is already a fully-qualified HTTP(S) URL.
///
/// Such references are handed to the renderer untouched; everything else is treated as a
/// path relative to the configured upload root.
pub fn is_absolute_url(value: &str) -> bool {
    absolute_url_pattern().is_match(value)
}
