// src/core/flags.rs

//! Derivation of command-line flag names from schema keys.
//!
//! A schema key encodes both flag forms. `outputDir` is `-o, --output-dir`; when the short
//! letter should differ from the first character it is marked with an underscore, so
//! `p_outputDir` is `-p, --output-dir`. The resolver and the help renderer both go through
//! this module, so the flags shown in help are exactly the flags that are accepted.

use crate::constants::SHORT_LETTER_MARKER;

/// The short and long flag names derived from a schema key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagNames {
    /// The short flag letter. `None` only for an empty key.
    pub short: Option<char>,
    /// The hyphenated long flag name, without dashes.
    pub long: String,
}

impl FlagNames {
    /// The single-dash form, e.g. `-o`.
    pub fn short_flag(&self) -> Option<String> {
        self.short.map(|letter| format!("-{}", letter))
    }

    /// The double-dash form, e.g. `--output-dir`.
    pub fn long_flag(&self) -> String {
        format!("--{}", self.long)
    }

    /// The `-o, --output-dir` label used in option tables.
    pub fn label(&self) -> String {
        match self.short_flag() {
            Some(short) => format!("{}, {}", short, self.long_flag()),
            None => self.long_flag(),
        }
    }
}

/// Derives the short letter and the hyphenated long name from a schema key.
///
/// A key written `<letter>_<longName>` uses `letter` as the short flag and `longName` as the
/// long one. Otherwise the first `_<letter>` segment of the key, if any, selects the short
/// letter and is removed from the long name, and without one the short letter is the first
/// character of the key.
pub fn derive_flag_names(key: &str) -> FlagNames {
    let mut chars = key.chars();
    let first = chars.next();

    if let Some(letter) = first
        && let Some(long) = chars
            .as_str()
            .strip_prefix(SHORT_LETTER_MARKER)
            .filter(|long| !long.is_empty())
    {
        return FlagNames {
            short: Some(letter),
            long: hyphenate(long),
        };
    }

    let mut short = first;
    let mut base = key.to_string();

    if let Some(marker_pos) = key.find(SHORT_LETTER_MARKER) {
        let after_marker = marker_pos + SHORT_LETTER_MARKER.len_utf8();
        if let Some(letter) = key.get(after_marker..).and_then(|rest| rest.chars().next()) {
            short = Some(letter);
            base = format!(
                "{}{}",
                key.get(..marker_pos).unwrap_or_default(),
                key.get(after_marker + letter.len_utf8()..).unwrap_or_default()
            );
        }
    }

    FlagNames {
        short,
        long: hyphenate(&base),
    }
}

/// Converts a camelCase name into its lowercase, hyphenated flag form (`outputDir` -> `output-dir`).
///
/// A hyphen is inserted between a lowercase letter and the uppercase letter that follows it.
/// Applying it to an already hyphenated name returns the name unchanged.
pub fn hyphenate(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c);
    }
    out.to_lowercase()
}

/// The width a key occupies in a help table before padding: its length without markers.
pub fn display_width(key: &str) -> usize {
    key.chars().filter(|&c| c != SHORT_LETTER_MARKER).count()
}
