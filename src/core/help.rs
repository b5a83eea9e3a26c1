// src/core/help.rs

//! Renders the help screens: the list of commands, and the usage of a single command.
//!
//! Option flags are derived with the same rules the resolver uses, so the help never shows
//! a flag that would not be accepted.

use crate::{
    constants::{HELP_COMMAND, KEY_WIDTH_MARGIN, MIN_PADDING},
    core::flags::{derive_flag_names, display_width},
    models::{CommandDescriptor, CommandRegistry, ResolvedInput},
};
use colored::*;

/// Pads `text` with spaces up to `width`, always leaving at least two spaces.
pub fn pad(text: &str, width: usize) -> String {
    let len = width
        .saturating_sub(text.chars().count())
        .max(MIN_PADDING);
    format!("{}{}", text, " ".repeat(len))
}

/// The column width of a help table: the widest key plus a margin, or 0 for no keys.
pub fn key_column_width<'a>(keys: impl IntoIterator<Item = &'a String>) -> usize {
    keys.into_iter()
        .map(|key| display_width(key) + KEY_WIDTH_MARGIN)
        .max()
        .unwrap_or(0)
}

/// Renders the help screen for a dispatch.
///
/// When `command_name` is `help` and the first positional argument names a registered
/// command, that command's usage is rendered. Otherwise the command list is rendered.
pub fn render_help(
    input: Option<&ResolvedInput>,
    registry: &CommandRegistry,
    command_name: Option<&str>,
    program: &str,
) -> String {
    let target = match (command_name, input) {
        (Some(HELP_COMMAND), Some(input)) => input
            .args()
            .first()
            .and_then(|name| registry.get_key_value(name.as_str())),
        _ => None,
    };

    match target {
        Some((name, descriptor)) => render_command_usage(program, name, descriptor),
        None => render_command_list(program, registry),
    }
}

/// Renders the usage block of a single command with its option table.
pub fn render_command_usage(program: &str, name: &str, descriptor: &CommandDescriptor) -> String {
    let width = key_column_width(descriptor.options.keys());

    let mut out = format!(
        "{}\n  {} {}",
        t!("help.command_usage"),
        program.green(),
        name.cyan()
    );
    if width > 0 {
        out.push_str(&format!(" {}\n", t!("help.placeholder.options").yellow()));
    }
    out.push('\n');

    if width > 0 {
        out.push_str(t!("help.options"));
        for (key, spec) in &descriptor.options {
            let label = derive_flag_names(key).label();
            out.push_str(&format!(
                "\n  {}{}",
                pad(&label, width + MIN_PADDING).yellow(),
                spec.help.bright_black()
            ));
        }
    }

    out
}

/// Renders the generic usage line and one line per registered command.
pub fn render_command_list(program: &str, registry: &CommandRegistry) -> String {
    let width = key_column_width(registry.keys());

    let mut out = format!(
        "{}\n  {} {} {}\n\n{}",
        t!("help.usage"),
        program.green(),
        t!("help.placeholder.command").cyan(),
        t!("help.placeholder.options"),
        t!("help.commands")
    );

    for (name, descriptor) in registry {
        let keys = match &descriptor.alias {
            Some(alias) => format!("{}, {}", name, alias),
            None => name.clone(),
        };
        out.push_str(&format!(
            "\n  {}{}",
            pad(&keys, width + MIN_PADDING).cyan(),
            descriptor.note.bright_black()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.insert(
            "build".to_string(),
            CommandDescriptor::new("Builds the project")
                .alias("b")
                .option("o", "desc|x")
                .option("p_outputDir", "Where to write|dist"),
        );
        registry.insert("clean".to_string(), CommandDescriptor::new("Removes artifacts"));
        registry
    }

    fn help_input(args: &[&str]) -> ResolvedInput {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        resolve(&args, &[])
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("abc", 6), "abc   ");
        assert_eq!(pad("abcdef", 6), "abcdef  ");
        assert_eq!(pad("abcdefgh", 6), "abcdefgh  ");
    }

    #[test]
    fn test_key_column_width() {
        let keys = ["o".to_string(), "p_outputDir".to_string()];
        assert_eq!(key_column_width(&keys), 10 + KEY_WIDTH_MARGIN);
        assert_eq!(key_column_width(std::iter::empty()), 0);
    }

    #[test]
    fn test_render_command_usage() {
        colored::control::set_override(false);
        let input = help_input(&["build"]);
        let out = render_help(Some(&input), &registry(), Some(HELP_COMMAND), "tool");

        assert_eq!(
            out,
            "Command Usage:\n  tool build <options>\n\nOptions:\
             \n  -o, --o         desc\
             \n  -p, --output-dir  Where to write"
        );
    }

    #[test]
    fn test_render_command_usage_without_options() {
        colored::control::set_override(false);
        let input = help_input(&["clean"]);
        let out = render_help(Some(&input), &registry(), Some(HELP_COMMAND), "tool");
        assert_eq!(out, "Command Usage:\n  tool clean\n");
    }

    #[test]
    fn test_render_command_list() {
        colored::control::set_override(false);
        let out = render_help(None, &registry(), None, "tool");

        assert_eq!(
            out,
            "Usage:\n  tool <command> <options>\n\nCommands:\
             \n  build, b   Builds the project\
             \n  clean      Removes artifacts"
        );
    }

    #[test]
    fn test_render_help_unknown_target_lists_commands() {
        colored::control::set_override(false);
        let input = help_input(&["deploy"]);
        let out = render_help(Some(&input), &registry(), Some(HELP_COMMAND), "tool");
        assert!(out.starts_with("Usage:"));
        assert!(out.contains("clean"));
    }

    #[test]
    fn test_render_help_for_other_command_lists_commands() {
        colored::control::set_override(false);
        let input = help_input(&["build"]);
        let out = render_help(Some(&input), &registry(), Some("clean"), "tool");
        assert!(out.starts_with("Usage:"));
    }
}
