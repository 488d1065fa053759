//! Parsers for the two configuration dialects.
//!
//! `indent` is the line-oriented view used while the text is being edited
//! (and is often invalid); `yaml` is the full structural parse.

pub mod indent;
pub mod properties;
pub mod yaml;

pub use indent::{parse_lines, physical_lines, DocumentLine};
pub use yaml::parse_yaml;
