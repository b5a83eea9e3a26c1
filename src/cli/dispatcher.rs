//! Interpreter stripping and the record a dispatch returns.

use crate::{
    constants::INTERPRETER_PATTERN,
    models::{CommandDescriptor, ResolvedInput},
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INTERPRETER_RE: Regex =
        Regex::new(INTERPRETER_PATTERN).expect("interpreter pattern is a valid regex");
}

/// Why a dispatch ended on the help screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpReason {
    /// No command name was given.
    NoCommand,
    /// The command name is not registered.
    UnknownCommand(String),
    /// The command is registered but has no handler, which includes the built-in `help`.
    NoHandler,
}

/// What a dispatch ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command handler ran to completion.
    Handled,
    /// The help screen was rendered instead.
    Help(HelpReason),
}

/// The record of a single dispatch: which command ran, with what input, and how it ended.
///
/// The registry itself is never modified by a dispatch, so a `Shell` can be run any number of
/// times.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// The command name as given on the command line, if any.
    pub command_name: Option<String>,
    /// The descriptor of the matched command. `None` when no registered command matched.
    pub descriptor: Option<CommandDescriptor>,
    /// The input resolved against the global and command options. Empty when nothing matched.
    pub input: ResolvedInput,
    /// Whether a handler ran or help was shown, and why.
    pub outcome: Outcome,
}

impl DispatchResult {
    /// Whether a command handler ran.
    pub fn is_handled(&self) -> bool {
        self.outcome == Outcome::Handled
    }
}

/// Whether `arg` is the path of a script interpreter (e.g. `/usr/bin/node`).
pub fn is_interpreter(arg: &str) -> bool {
    INTERPRETER_RE.is_match(arg)
}

/// Removes the program path from an argument vector, and the interpreter path before it when
/// the program runs as a script. Returns the command name and the arguments after it.
pub fn split_command(argv: &[String]) -> (Option<&str>, &[String]) {
    let skip = match argv.first() {
        Some(first) if is_interpreter(first) => 2,
        Some(_) => 1,
        None => 0,
    };
    let rest = argv.get(skip..).unwrap_or_default();

    match rest.split_first() {
        Some((command, args)) => (Some(command.as_str()), args),
        None => (None, rest),
    }
}
