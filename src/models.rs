// src/models.rs

//! Data types shared across the crate: option and command declarations, resolved input, and
//! package metadata.

use crate::constants::{OPTION_SEPARATOR, POSITIONAL_KEY};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use std::fmt;

// --- OPTION SCHEMA MODELS ---

/// The declaration of a single option: its help text and an optional default value.
///
/// At the configuration boundary an option is written in its packed form,
/// `"<help>|<default>"`, which is split on the first pipe. `"Verbose output"` declares no
/// default, while `"Output directory|dist"` declares `dist`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub struct OptionSpec {
    /// Text shown next to the flags in help.
    pub help: String,
    /// Value used when the option is not passed.
    pub default: Option<String>,
}

impl OptionSpec {
    /// Creates an option with help text and no default.
    pub fn new(help: impl Into<String>) -> Self {
        Self {
            help: help.into(),
            default: None,
        }
    }

    /// Sets the value used when the option is absent from the command line.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Parses the packed `"<help>|<default>"` form.
    pub fn parse_packed(packed: &str) -> Self {
        match packed.split_once(OPTION_SEPARATOR) {
            Some((help, default)) => Self {
                help: help.to_string(),
                default: Some(default.to_string()),
            },
            None => Self::new(packed),
        }
    }
}

impl From<&str> for OptionSpec {
    fn from(packed: &str) -> Self {
        Self::parse_packed(packed)
    }
}

impl From<String> for OptionSpec {
    fn from(packed: String) -> Self {
        Self::parse_packed(&packed)
    }
}

impl From<OptionSpec> for String {
    fn from(spec: OptionSpec) -> Self {
        match spec.default {
            Some(default) => format!("{}{}{}", spec.help, OPTION_SEPARATOR, default),
            None => spec.help,
        }
    }
}

/// Schema key -> option declaration, in declaration order.
pub type OptionSchema = IndexMap<String, OptionSpec>;

// --- COMMAND MODELS ---

/// The metadata record for one registered command.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// One-line summary shown in the command list.
    #[serde(default)]
    pub note: String,
    /// Secondary name, shown next to the command name in help.
    #[serde(default)]
    pub alias: Option<String>,
    /// The options this command accepts.
    #[serde(default)]
    pub options: OptionSchema,
}

impl CommandDescriptor {
    /// Creates a command with a note and no options.
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..Self::default()
        }
    }

    /// Sets the alias shown in help.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Declares an option. `spec` accepts either an `OptionSpec` or the packed string form.
    pub fn option(mut self, key: impl Into<String>, spec: impl Into<OptionSpec>) -> Self {
        self.options.insert(key.into(), spec.into());
        self
    }
}

/// Command name -> descriptor. Insertion order drives the help listing.
pub type CommandRegistry = IndexMap<String, CommandDescriptor>;

// --- RESOLVED INPUT MODELS ---

/// A value captured for a named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    /// The flag was passed without a following value.
    Flag,
    /// The value that followed the flag, or the declared default.
    Text(String),
}

impl InputValue {
    /// Returns the text value, or `None` for a bare flag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Text(text) => Some(text),
        }
    }

    /// A bare flag or a non-empty text value counts as "on".
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag => true,
            Self::Text(text) => !text.is_empty(),
        }
    }
}

impl Serialize for InputValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag => serializer.serialize_bool(true),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "true"),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

/// The result of resolving an argument vector against a set of option schemas.
///
/// Every declared schema key has an entry, keyed by the key exactly as it was declared
/// (`o_outputDir`, not `outputDir`). An entry is `None` when the option was neither passed nor
/// given a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedInput {
    pub(crate) positional: Vec<String>,
    pub(crate) values: IndexMap<String, Option<InputValue>>,
}

impl ResolvedInput {
    /// Positional arguments in the order they were given (the `$` list).
    pub fn args(&self) -> &[String] {
        &self.positional
    }

    /// Returns the resolved value of an option, if it has one.
    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.values.get(key).and_then(Option::as_ref)
    }

    /// Returns the resolved text of an option. Bare flags have no text.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(InputValue::as_str)
    }

    /// Whether the option is on: passed as a bare flag, or resolved to non-empty text.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(InputValue::is_truthy)
    }

    /// Whether `key` was declared by any of the schemas used for resolution.
    pub fn is_declared(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates over every declared key and its resolved value.
    pub fn values(&self) -> impl Iterator<Item = (&str, Option<&InputValue>)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }
}

/// Serializes as one map: the positional list under `$`, then every declared key.
/// Unset options serialize as `null`, bare flags as `true`.
impl Serialize for ResolvedInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(POSITIONAL_KEY, &self.positional)?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// --- PACKAGE METADATA ---

/// The subset of a `Cargo.toml` manifest used for usage text.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// The package name, used as the program name.
    pub name: String,
    /// The package version, absent when inherited from a workspace.
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageInfo {
    /// Package metadata with a known version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_spec_parse_packed() {
        let spec = OptionSpec::parse_packed("Output directory|dist");
        assert_eq!(spec.help, "Output directory");
        assert_eq!(spec.default.as_deref(), Some("dist"));

        let spec = OptionSpec::parse_packed("Verbose output");
        assert_eq!(spec.help, "Verbose output");
        assert!(spec.default.is_none());
    }

    #[test]
    fn test_option_spec_splits_on_first_pipe_only() {
        let spec = OptionSpec::parse_packed("Separator|a|b");
        assert_eq!(spec.help, "Separator");
        assert_eq!(spec.default.as_deref(), Some("a|b"));
    }

    #[test]
    fn test_option_spec_empty_default_is_kept() {
        let spec = OptionSpec::parse_packed("Name|");
        assert_eq!(spec.default.as_deref(), Some(""));
        assert_eq!(String::from(spec), "Name|");
    }

    #[test]
    fn test_command_descriptor_deserializes_packed_options() {
        let json = r#"{"note": "Builds it", "options": {"o_outDir": "Output|dist", "verbose": "Talk more"}}"#;
        let descriptor: CommandDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(descriptor.note, "Builds it");
        assert!(descriptor.alias.is_none());
        let keys: Vec<&str> = descriptor.options.keys().map(String::as_str).collect();
        assert_eq!(keys, ["o_outDir", "verbose"]);
        assert_eq!(
            descriptor.options["o_outDir"],
            OptionSpec::new("Output").with_default("dist")
        );
    }

    #[test]
    fn test_input_value_truthiness() {
        assert!(InputValue::Flag.is_truthy());
        assert!(InputValue::Text("x".into()).is_truthy());
        assert!(!InputValue::Text(String::new()).is_truthy());
        assert_eq!(InputValue::Flag.to_string(), "true");
    }

    #[test]
    fn test_resolved_input_serializes_with_positional_key() {
        let mut values = IndexMap::new();
        values.insert("o_out".to_string(), Some(InputValue::Text("dist".into())));
        values.insert("force".to_string(), Some(InputValue::Flag));
        values.insert("name".to_string(), None);
        let input = ResolvedInput {
            positional: vec!["src".to_string()],
            values,
        };

        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(
            json,
            r#"{"$":["src"],"o_out":"dist","force":true,"name":null}"#
        );
    }
}
