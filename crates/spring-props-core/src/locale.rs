//! Message locale selection.

/// Locales with a translation file.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es"];

/// Environment variable that overrides every other locale source.
pub const LOCALE_ENV: &str = "SPRING_PROPS_LOCALE";

/// Reduce a locale tag such as `es_ES.UTF-8` or `es-MX` to a supported
/// language code.
pub fn normalize(tag: &str) -> Option<&'static str> {
    let language = tag
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| *supported == language)
}

/// Pick the first supported locale among the candidates, or `en`.
pub fn resolve<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> &'static str {
    candidates
        .into_iter()
        .flatten()
        .find_map(normalize)
        .unwrap_or("en")
}

/// Set the message locale from `SPRING_PROPS_LOCALE`, then `LC_ALL`/`LANG`,
/// then the system locale.
pub fn init_from_env() -> &'static str {
    let explicit = std::env::var(LOCALE_ENV).ok();
    let lc_all = std::env::var("LC_ALL").ok();
    let lang = std::env::var("LANG").ok();
    let system = sys_locale::get_locale();

    let locale = resolve([
        explicit.as_deref(),
        lc_all.as_deref(),
        lang.as_deref(),
        system.as_deref(),
    ]);
    rust_i18n::set_locale(locale);
    tracing::debug!(locale, "message locale selected");
    locale
}
