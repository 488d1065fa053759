//! Client configuration types for LSP integration.
//!
//! Editors send these through `initializationOptions` and
//! `workspace/didChangeConfiguration`, either wrapped in a `springProps`
//! section or as the section object itself.
//!
//! All fields are `Option<T>` so partial updates only override what the
//! client actually sent; anything missing keeps the value from
//! `.spring-props.toml` (or the previous update).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use spring_props_core::Settings;

/// Settings section name used by editor extensions.
pub const SECTION: &str = "springProps";

/// Client settings received from the editor.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientSettings {
    /// Publish YAML syntax diagnostics
    pub diagnostics: Option<bool>,

    /// Offer enum values in value position
    pub value_hints: Option<bool>,

    /// Output locale for messages (e.g. "en", "es")
    /// Uses Option<Option<String>> to distinguish:
    /// - None = field not in JSON (preserve the current locale)
    /// - Some(None) = field in JSON as null (revert to auto-detection)
    /// - Some(Some(v)) = field in JSON with value (set locale to v)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_explicit_null"
    )]
    pub locale: Option<Option<String>>,
}

/// Keep an explicit JSON `null` as `Some(None)`.
fn deserialize_explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ClientSettings {
    /// Parse a settings payload, unwrapping the `springProps` section when
    /// present.
    pub fn from_json(value: JsonValue) -> Result<Self, serde_json::Error> {
        let section = match value {
            JsonValue::Object(mut map) if map.contains_key(SECTION) => {
                map.remove(SECTION).unwrap_or(JsonValue::Null)
            }
            other => other,
        };
        match section {
            JsonValue::Null => Ok(Self::default()),
            section => serde_json::from_value(section),
        }
    }

    /// Apply the fields the client sent on top of `settings`.
    pub fn merge_into_settings(&self, settings: &mut Settings) {
        if let Some(enabled) = self.diagnostics {
            settings.diagnostics.enabled = enabled;
        }
        if let Some(value_hints) = self.value_hints {
            settings.completion.value_hints = value_hints;
        }
    }

    /// Switch the message locale when the client sent one.
    ///
    /// Returns the locale now in effect, or `None` when nothing changed.
    pub fn apply_locale(&self) -> Option<&'static str> {
        match self.locale.as_ref()? {
            Some(tag) => {
                let locale = spring_props_core::locale::normalize(tag)?;
                rust_i18n::set_locale(locale);
                Some(locale)
            }
            None => Some(spring_props_core::locale::init_from_env()),
        }
    }
}
