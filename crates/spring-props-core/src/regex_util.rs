//! Lazily-compiled static regex patterns.
//!
//! Patterns are compiled on first use and cached for the life of the process.
//! A malformed pattern is a programming error and panics with the pattern text.

/// Declare a module-private function returning `&'static regex::Regex`.
///
/// The calling module must have `use regex::Regex;` in scope.
///
/// ```ignore
/// use regex::Regex;
/// use crate::regex_util::static_regex;
///
/// static_regex!(fn yaml_key, r"^\s*([A-Za-z0-9._-]+):");
/// assert!(yaml_key().is_match("server:"));
/// ```
macro_rules! static_regex {
    (fn $fname:ident, $pattern:expr) => {
        fn $fname() -> &'static Regex {
            static CELL: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
            CELL.get_or_init(|| {
                Regex::new($pattern).expect(concat!("BUG: invalid static regex: ", $pattern))
            })
        }
    };
}
pub(crate) use static_regex;
