//! Property catalog
//!
//! An immutable table of documented Spring Boot properties, keyed by the fully
//! qualified dotted name. The table is read from Spring's configuration
//! metadata JSON format (`properties` + `hints`), validated once, and shared
//! read-only across every request.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::diagnostics::CatalogError;

const BUILTIN_METADATA: &str = include_str!("../data/spring-boot-metadata.json");

/// Value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    String,
    Integer,
    Boolean,
    Duration,
}

impl PropertyType {
    /// Map a metadata type name to a property type.
    ///
    /// Accepts the short names as well as the Java types Spring emits.
    /// Anything unrecognised is treated as a string.
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" | "long" | "short" | "java.lang.integer" | "java.lang.long"
            | "java.lang.short" => PropertyType::Integer,
            "boolean" | "java.lang.boolean" => PropertyType::Boolean,
            "duration" | "java.time.duration" => PropertyType::Duration,
            _ => PropertyType::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Boolean => "boolean",
            PropertyType::Duration => "duration",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documented property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: String,
    pub kind: PropertyType,
    pub description: String,
    pub default: Option<String>,
    /// Ordered list of allowed literal values, when the property is an enum.
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct MetadataFile {
    #[serde(default)]
    properties: Vec<MetadataProperty>,
    #[serde(default)]
    hints: Vec<MetadataHint>,
}

#[derive(Debug, Deserialize)]
struct MetadataProperty {
    name: String,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "defaultValue", default)]
    default_value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MetadataHint {
    name: String,
    #[serde(default)]
    values: Vec<MetadataHintValue>,
}

#[derive(Debug, Deserialize)]
struct MetadataHintValue {
    value: serde_json::Value,
}

/// Render a JSON scalar the way it would be written in a config file.
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| !segment.is_empty())
        && !name.chars().any(char::is_whitespace)
}

/// Immutable table of documented properties.
///
/// Backed by a `BTreeMap`, so iteration is always in lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, PropertyEntry>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Catalog::from_json(BUILTIN_METADATA, "built-in metadata")
                .expect("BUG: built-in property metadata is invalid")
        })
    }

    /// Parse and validate a standalone metadata document.
    ///
    /// `origin` names the source in error messages.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();
        catalog.extend_from_json(json, origin)?;
        Ok(catalog)
    }

    /// Add the properties of a metadata document, then apply its hints.
    ///
    /// Properties replace entries of the same name. Hints may target any
    /// property of the extended catalog, so a hints-only document (the usual
    /// `additional-spring-configuration-metadata.json`) is accepted. On error
    /// the catalog is left unchanged.
    pub fn extend_from_json(&mut self, json: &str, origin: &str) -> Result<(), CatalogError> {
        let file: MetadataFile =
            serde_json::from_str(json).map_err(|source| CatalogError::Json {
                origin: origin.to_string(),
                source,
            })?;

        let mut added = BTreeMap::new();
        for property in file.properties {
            if !is_valid_name(&property.name) {
                return Err(CatalogError::InvalidName {
                    name: property.name,
                    origin: origin.to_string(),
                });
            }
            let entry = PropertyEntry {
                name: property.name.clone(),
                kind: property
                    .type_name
                    .as_deref()
                    .map(PropertyType::from_type_name)
                    .unwrap_or(PropertyType::String),
                description: property.description.unwrap_or_default(),
                default: property.default_value.as_ref().and_then(scalar_to_string),
                enum_values: None,
            };
            if added.insert(property.name.clone(), entry).is_some() {
                return Err(CatalogError::DuplicateName {
                    name: property.name,
                    origin: origin.to_string(),
                });
            }
        }

        let mut entries = self.entries.clone();
        entries.extend(added);

        for hint in file.hints {
            let Some(entry) = entries.get_mut(&hint.name) else {
                return Err(CatalogError::OrphanHint {
                    name: hint.name,
                    origin: origin.to_string(),
                });
            };
            let values: Vec<String> = hint
                .values
                .iter()
                .filter_map(|v| scalar_to_string(&v.value))
                .collect();
            if !values.is_empty() {
                entry.enum_values = Some(values);
            }
        }

        self.entries = entries;
        Ok(())
    }

    /// Build the built-in catalog extended with additional metadata files.
    ///
    /// Relative paths resolve against `root`. Files apply in order, so later
    /// files override entries of the same name and may hint properties that
    /// earlier files (or the built-in table) define.
    pub fn with_metadata_files(root: &Path, files: &[PathBuf]) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::builtin().clone();
        for file in files {
            let path = if file.is_absolute() {
                file.clone()
            } else {
                root.join(file)
            };
            let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Read {
                path: path.clone(),
                source,
            })?;
            let before = catalog.len();
            catalog.extend_from_json(&content, &path.display().to_string())?;
            tracing::debug!(
                path = %path.display(),
                added = catalog.len() - before,
                "merged additional property metadata"
            );
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether any documented property lives strictly below `path`.
    pub fn has_descendants(&self, path: &str) -> bool {
        let prefix = format!("{}.", path);
        self.entries
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(name, _)| name.starts_with(&prefix))
    }

    /// Property names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        let port = catalog.get("server.port").unwrap();
        assert_eq!(port.kind, PropertyType::Integer);
        assert_eq!(port.default.as_deref(), Some("8080"));
        assert!(port.enum_values.is_none());
    }

    #[test]
    fn test_builtin_enum_values_keep_authored_order() {
        let ddl = Catalog::builtin().get("spring.jpa.hibernate.ddl-auto").unwrap();
        assert_eq!(
            ddl.enum_values.as_deref().unwrap(),
            ["none", "validate", "update", "create", "create-drop"]
        );
    }

    #[test]
    fn test_names_are_sorted() {
        let names: Vec<&str> = Catalog::builtin().names().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_java_type_names() {
        assert_eq!(
            PropertyType::from_type_name("java.lang.Integer"),
            PropertyType::Integer
        );
        assert_eq!(
            PropertyType::from_type_name("java.time.Duration"),
            PropertyType::Duration
        );
        assert_eq!(
            PropertyType::from_type_name("java.lang.Boolean"),
            PropertyType::Boolean
        );
        assert_eq!(
            PropertyType::from_type_name("java.util.List<java.lang.String>"),
            PropertyType::String
        );
    }

    #[test]
    fn test_has_descendants() {
        let catalog = Catalog::builtin();
        assert!(catalog.has_descendants("spring.datasource"));
        assert!(catalog.has_descendants("logging.level.org.hibernate"));
        assert!(!catalog.has_descendants("server.port"));
        // "server.ssl.key-store" is a prefix of "server.ssl.key-store-password"
        // but not at a dot boundary.
        assert!(!catalog.has_descendants("server.ssl.key-store"));
    }

    #[test]
    fn test_defaults_accept_json_scalars() {
        let json = r#"{
            "properties": [
                {"name": "a.flag", "type": "java.lang.Boolean", "defaultValue": true},
                {"name": "a.size", "type": "java.lang.Integer", "defaultValue": 42},
                {"name": "a.name"}
            ]
        }"#;
        let catalog = Catalog::from_json(json, "test").unwrap();
        assert_eq!(catalog.get("a.flag").unwrap().default.as_deref(), Some("true"));
        assert_eq!(catalog.get("a.size").unwrap().default.as_deref(), Some("42"));
        let name = catalog.get("a.name").unwrap();
        assert_eq!(name.kind, PropertyType::String);
        assert!(name.default.is_none());
        assert!(name.description.is_empty());
    }

    #[test]
    fn test_rejects_invalid_names() {
        for bad in ["", "a..b", ".a", "a.", "a b"] {
            let json = format!(r#"{{"properties": [{{"name": "{}"}}]}}"#, bad);
            let err = Catalog::from_json(&json, "test").unwrap_err();
            assert!(matches!(err, CatalogError::InvalidName { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_rejects_duplicates() {
        let json = r#"{"properties": [{"name": "a.b"}, {"name": "a.b"}]}"#;
        let err = Catalog::from_json(json, "test").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { .. }));
    }

    #[test]
    fn test_rejects_orphan_hints() {
        let json = r#"{"properties": [], "hints": [{"name": "x.y", "values": [{"value": "a"}]}]}"#;
        let err = Catalog::from_json(json, "test").unwrap_err();
        assert!(matches!(err, CatalogError::OrphanHint { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Catalog::from_json("{not json", "test").unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_metadata_files_merge_over_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("extra.json"),
            r#"{
                "properties": [
                    {"name": "app.feature.enabled", "type": "boolean", "description": "Feature switch"},
                    {"name": "server.port", "type": "integer", "description": "Overridden", "defaultValue": 9090}
                ]
            }"#,
        )
        .unwrap();

        let catalog =
            Catalog::with_metadata_files(dir.path(), &[PathBuf::from("extra.json")]).unwrap();
        assert!(catalog.contains("app.feature.enabled"));
        assert!(catalog.contains("spring.datasource.url"));
        let port = catalog.get("server.port").unwrap();
        assert_eq!(port.description, "Overridden");
        assert_eq!(port.default.as_deref(), Some("9090"));

        // The shared built-in table is untouched.
        assert_eq!(
            Catalog::builtin().get("server.port").unwrap().default.as_deref(),
            Some("8080")
        );
    }

    #[test]
    fn test_hints_only_file_targets_builtin_property() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("additional.json"),
            r#"{"hints": [{"name": "server.port", "values": [{"value": 8080}, {"value": 8443}]}]}"#,
        )
        .unwrap();

        let catalog =
            Catalog::with_metadata_files(dir.path(), &[PathBuf::from("additional.json")]).unwrap();
        let port = catalog.get("server.port").unwrap();
        assert_eq!(
            port.enum_values.as_deref(),
            Some(&["8080".to_string(), "8443".to_string()][..])
        );
        assert_eq!(port.description, Catalog::builtin().get("server.port").unwrap().description);
    }

    #[test]
    fn test_hints_may_target_properties_of_an_earlier_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("acme.json"),
            r#"{"properties": [{"name": "acme.mode", "type": "java.lang.String"}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("acme-hints.json"),
            r#"{"hints": [{"name": "acme.mode", "values": [{"value": "fast"}, {"value": "safe"}]}]}"#,
        )
        .unwrap();

        let catalog = Catalog::with_metadata_files(
            dir.path(),
            &[PathBuf::from("acme.json"), PathBuf::from("acme-hints.json")],
        )
        .unwrap();
        assert_eq!(
            catalog.get("acme.mode").unwrap().enum_values.as_deref(),
            Some(&["fast".to_string(), "safe".to_string()][..])
        );
    }

    #[test]
    fn test_failed_extension_leaves_catalog_unchanged() {
        let mut catalog = Catalog::from_json(
            r#"{"properties": [{"name": "a.b", "type": "string"}]}"#,
            "base",
        )
        .unwrap();
        let err = catalog
            .extend_from_json(
                r#"{"properties": [{"name": "c.d"}], "hints": [{"name": "x.y", "values": []}]}"#,
                "extra",
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::OrphanHint { ref name, .. } if name == "x.y"));
        assert!(!catalog.contains("c.d"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_metadata_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::with_metadata_files(dir.path(), &[PathBuf::from("nope.json")])
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
