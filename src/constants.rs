// src/constants.rs

//! Names and numbers shared by the resolver, the help renderer and the dispatcher.

/// The name of the built-in command that renders usage for other commands.
pub const HELP_COMMAND: &str = "help";

/// The key under which positional arguments are exposed in a resolved input.
pub const POSITIONAL_KEY: &str = "$";

/// Separator between the help text and the default value of a packed option entry.
pub const OPTION_SEPARATOR: char = '|';

/// Marks the short letter inside a schema key (`o_outputDir` -> `-o, --output-dir`).
pub const SHORT_LETTER_MARKER: char = '_';

/// The minimum number of spaces between a help column and its description.
pub const MIN_PADDING: usize = 2;

/// Extra columns added to the widest key when sizing a help table.
pub const KEY_WIDTH_MARGIN: usize = 4;

/// The name of the package manifest read for the program name and version.
pub const MANIFEST_FILENAME: &str = "Cargo.toml";

/// The default permission bits used by `mkdirp` (before the process umask).
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Matches `argv[0]` values that belong to a script interpreter rather than the program itself.
pub const INTERPRETER_PATTERN: &str = r"\b(?:node|rust-script|cargo-script)(?:\.exe)?$";
