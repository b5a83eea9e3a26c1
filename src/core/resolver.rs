// src/core/resolver.rs

//! Turns an argument vector into a `ResolvedInput`.

use crate::{
    core::flags::derive_flag_names,
    models::{InputValue, OptionSchema, ResolvedInput},
};
use indexmap::IndexMap;
use log::{debug, trace};

/// Flags exactly as they appeared on the command line (`-o`, `--output-dir`, `-abc`),
/// together with the positional arguments collected around them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    /// Flag spelling -> captured value, in order of first appearance.
    pub flags: IndexMap<String, InputValue>,
    /// Tokens that were neither a flag nor a flag value.
    pub positional: Vec<String>,
}

impl RawInput {
    /// Classifies a stream of arguments into flags and positional values.
    ///
    /// # Logic:
    /// - Any token starting with `-` becomes the pending flag and is recorded as a bare flag.
    /// - A token following a pending flag becomes that flag's value.
    /// - Any other token is positional.
    pub fn scan(args: &[String]) -> Self {
        let mut raw = Self::default();
        let mut pending: Option<&str> = None;

        for arg in args {
            if arg.starts_with('-') {
                raw.flags.insert(arg.clone(), InputValue::Flag);
                pending = Some(arg.as_str());
            } else if let Some(flag) = pending.take() {
                raw.flags
                    .insert(flag.to_string(), InputValue::Text(arg.clone()));
            } else {
                raw.positional.push(arg.clone());
            }
        }

        raw
    }

    /// Expands clustered short flags: `-abc` becomes `-a`, `-b` and `-c`.
    ///
    /// A value captured by the cluster (`-abc value`) is given to every expanded letter.
    pub fn expand_clusters(&mut self) {
        let clusters: Vec<String> = self
            .flags
            .keys()
            .filter(|key| is_cluster(key))
            .cloned()
            .collect();

        for cluster in clusters {
            let Some(value) = self.flags.shift_remove(&cluster) else {
                continue;
            };
            trace!("Expanding flag cluster '{}'", cluster);
            for letter in cluster.chars().skip(1) {
                self.flags.insert(format!("-{}", letter), value.clone());
            }
        }
    }

    /// Looks up a raw flag by its exact command-line spelling.
    pub fn flag(&self, flag: &str) -> Option<&InputValue> {
        self.flags.get(flag)
    }
}

/// A single dash followed by two or more characters.
fn is_cluster(key: &str) -> bool {
    key.strip_prefix('-')
        .is_some_and(|rest| !rest.starts_with('-') && rest.chars().count() >= 2)
}

/// Resolves an argument vector against one or more option schemas.
///
/// Schemas are applied in order, so when two schemas declare the same key the later one
/// wins. For each key the value is taken from its short flag, then its long flag, then the
/// declared default. Keys are stored exactly as declared. This never fails: whatever cannot be
/// resolved is left unset for the command handler to deal with.
pub fn resolve(args: &[String], schemas: &[&OptionSchema]) -> ResolvedInput {
    let mut raw = RawInput::scan(args);
    raw.expand_clusters();
    debug!("Raw flags: {:?}, positional: {:?}", raw.flags, raw.positional);

    let mut values = IndexMap::new();
    for schema in schemas {
        for (key, spec) in schema.iter() {
            let names = derive_flag_names(key);
            let from_short = names
                .short_flag()
                .and_then(|short| raw.flag(&short).cloned());
            let value = from_short
                .or_else(|| raw.flag(&names.long_flag()).cloned())
                .or_else(|| spec.default.clone().map(InputValue::Text));
            trace!("Resolved option '{}' ({}) to {:?}", key, names.label(), value);
            values.insert(key.clone(), value);
        }
    }

    ResolvedInput {
        positional: raw.positional,
        values,
    }
}

// MARK: --- UNIT TESTS ---
