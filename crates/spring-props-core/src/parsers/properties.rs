//! `key=value` line helpers for `.properties` documents.

/// Split a properties line at its first `=`.
///
/// Both sides are trimmed. Lines without `=` or with an empty key yield
/// `None`.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
