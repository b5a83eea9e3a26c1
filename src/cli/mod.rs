//! # Shell
//!
//! `Shell` ties a `ShellConfig` to the handlers that implement its commands and runs one
//! dispatch per call: it finds the command named on the command line, resolves the remaining
//! arguments against the global and command option schemas, and calls the command's handler.
//! Anything it cannot dispatch ends on the help screen.

use crate::{
    constants::HELP_COMMAND,
    core::{
        config::{ShellConfig, load_package_info},
        help::render_help,
        resolver::resolve,
    },
    models::{CommandDescriptor, CommandRegistry, PackageInfo, ResolvedInput},
};
use anyhow::Result;
use colored::*;
use std::{
    collections::HashMap,
    fmt, io,
    io::Write,
    path::Path,
    sync::OnceLock,
};

pub mod dispatcher;
pub mod handlers;

use dispatcher::{DispatchResult, HelpReason, Outcome, split_command};

/// A command handler: receives the resolved input, the command's descriptor and the name it
/// was invoked with.
pub type Handler = Box<dyn Fn(&ResolvedInput, &CommandDescriptor, &str) -> Result<()>>;

/// A configured command-line tool: its configuration plus the handlers of its commands.
pub struct Shell {
    config: ShellConfig,
    handlers: HashMap<String, Handler>,
    package: OnceLock<Option<PackageInfo>>,
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        handlers.sort_unstable();
        f.debug_struct("Shell")
            .field("config", &self.config)
            .field("handlers", &handlers)
            .finish_non_exhaustive()
    }
}

impl Shell {
    /// Creates a shell with no handlers registered yet.
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            handlers: HashMap::new(),
            package: OnceLock::new(),
        }
    }

    /// Registers the handler for a command. A command without a handler shows help.
    pub fn handler<F>(mut self, command: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ResolvedInput, &CommandDescriptor, &str) -> Result<()> + 'static,
    {
        self.handlers.insert(command.into(), Box::new(handler));
        self
    }

    /// The configuration this shell dispatches against.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Package metadata, from the configuration or read once from the manifest under `root`.
    pub fn package(&self) -> Option<&PackageInfo> {
        self.package
            .get_or_init(|| {
                if let Some(package) = &self.config.package {
                    return Some(package.clone());
                }
                match load_package_info(&self.config.root_dir()) {
                    Ok(package) => Some(package),
                    Err(e) => {
                        log::debug!("No package metadata: {}", e);
                        None
                    }
                }
            })
            .as_ref()
    }

    /// The package version, when package metadata is available.
    pub fn version(&self) -> Option<&str> {
        self.package().and_then(|package| package.version.as_deref())
    }

    /// The name shown in usage text: the package name, then the configured name, then the
    /// file stem of the executable.
    pub fn program_name(&self, argv0: Option<&str>) -> String {
        self.package()
            .map(|package| package.name.clone())
            .or_else(|| self.config.name.clone())
            .or_else(|| {
                argv0
                    .and_then(|arg| Path::new(arg).file_stem())
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_default()
    }

    /// The commands shown in help: the built-in `help` command followed by the configured ones.
    ///
    /// Built for every dispatch, since the `help` note names the program being run.
    pub fn registry(&self, program: &str) -> CommandRegistry {
        let note = format!(
            "{} {} {}{}",
            t!("help.note"),
            program.green(),
            "help ".cyan(),
            t!("help.placeholder.command")
        );
        let mut registry = CommandRegistry::with_capacity(self.config.commands.len() + 1);
        registry.insert(HELP_COMMAND.to_string(), CommandDescriptor::new(note));
        for (name, descriptor) in &self.config.commands {
            registry.insert(name.clone(), descriptor.clone());
        }
        registry
    }

    /// Problems with the configuration that degrade the help screen.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.package().is_none() && self.config.name.is_none() {
            let root = self.config.root_dir();
            warnings.push(
                t!("warn.no_manifest")
                    .replace("{root}", &dunce::simplified(&root).display().to_string()),
            );
        }
        if self.config.commands.is_empty() {
            warnings.push(t!("warn.no_commands").to_string());
        }
        warnings
    }

    /// Dispatches one argument vector (`argv[0]` included) and writes any help to `out`.
    ///
    /// Configuration warnings are written first, whichever way the dispatch goes.
    ///
    /// # Errors
    /// Returns the handler's error if it fails, or an I/O error if output cannot be written.
    pub fn run(&self, argv: &[String], out: &mut dyn Write) -> Result<DispatchResult> {
        let (command_name, args) = split_command(argv);
        log::debug!("Dispatching command {:?} with args {:?}", command_name, args);

        self.write_warnings(out)?;

        let program = self.program_name(argv.first().map(String::as_str));
        let mut registry = self.registry(&program);

        let Some((name, descriptor)) = command_name.and_then(|name| registry.get_key_value(name))
        else {
            let reason = match command_name {
                Some(name) => HelpReason::UnknownCommand(name.to_string()),
                None => HelpReason::NoCommand,
            };
            if let HelpReason::UnknownCommand(name) = &reason {
                let warning = t!("warn.unknown_command").replace("{name}", name);
                writeln!(out, "{}\n", warning.red())?;
            }
            writeln!(out, "{}", render_help(None, &registry, None, &program))?;
            return Ok(DispatchResult {
                command_name: command_name.map(str::to_string),
                descriptor: None,
                input: ResolvedInput::default(),
                outcome: Outcome::Help(reason),
            });
        };
        let name = name.clone();

        // Command options are applied after the global ones so they win on shared keys.
        let input = resolve(args, &[&self.config.options, &descriptor.options]);

        let outcome = match self.handlers.get(name.as_str()) {
            Some(handler) => {
                log::debug!("Running handler for '{}'", name);
                handler(&input, descriptor, &name)?;
                Outcome::Handled
            }
            None => {
                log::debug!("No handler registered for '{}', showing help", name);
                writeln!(
                    out,
                    "{}",
                    render_help(Some(&input), &registry, Some(name.as_str()), &program)
                )?;
                Outcome::Help(HelpReason::NoHandler)
            }
        };

        let descriptor = registry.shift_remove(&name);
        Ok(DispatchResult {
            command_name: Some(name),
            descriptor,
            input,
            outcome,
        })
    }

    /// Dispatches the process arguments, writing help to standard output.
    pub fn run_env(&self) -> Result<DispatchResult> {
        let argv: Vec<String> = std::env::args().collect();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run(&argv, &mut out)
    }

    fn write_warnings(&self, out: &mut dyn Write) -> io::Result<()> {
        for warning in self.warnings() {
            log::warn!("{}", warning);
            writeln!(out, "{}", warning.red())?;
        }
        Ok(())
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InputValue;
    use anyhow::anyhow;
    use std::{cell::RefCell, rc::Rc};

    type Calls = Rc<RefCell<Vec<(String, ResolvedInput)>>>;

    fn to_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn config() -> ShellConfig {
        ShellConfig::new()
            .package(PackageInfo::new("tool", "1.4.2"))
            .option("x", "Shared|global")
            .option("v_verbose", "Talk more")
            .command(
                "build",
                CommandDescriptor::new("Builds the project")
                    .alias("b")
                    .option("o", "desc|x")
                    .option("x", "Overridden|command"),
            )
            .command("clean", CommandDescriptor::new("Removes artifacts"))
    }

    fn recording_shell() -> (Shell, Calls) {
        let calls: Calls = Rc::default();
        let recorder = Rc::clone(&calls);
        let shell = Shell::new(config()).handler("build", move |input, descriptor, name| {
            assert_eq!(descriptor.note, "Builds the project");
            recorder.borrow_mut().push((name.to_string(), input.clone()));
            Ok(())
        });
        (shell, calls)
    }

    fn run(shell: &Shell, argv: &[&str]) -> (Outcome, String) {
        colored::control::set_override(false);
        let mut out = Vec::<u8>::new();
        let result = shell.run(&to_args(argv), &mut out).unwrap();
        (result.outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_invokes_handler_with_resolved_input() {
        let (shell, calls) = recording_shell();
        let (outcome, out) = run(&shell, &["tool", "build", "-o", "dist", "src", "--verbose"]);

        assert_eq!(outcome, Outcome::Handled);
        assert!(out.is_empty());

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        let (name, input) = &calls[0];
        assert_eq!(name, "build");
        assert_eq!(input.get_str("o"), Some("dist"));
        assert_eq!(input.get("v_verbose"), Some(&InputValue::Flag));
        assert_eq!(input.args(), ["src"]);
    }

    #[test]
    fn test_command_option_wins_over_global() {
        let (shell, calls) = recording_shell();
        run(&shell, &["tool", "build"]);
        assert_eq!(calls.borrow()[0].1.get_str("x"), Some("command"));
    }

    #[test]
    fn test_run_behind_interpreter() {
        let (shell, calls) = recording_shell();
        let (outcome, _) = run(&shell, &["/usr/bin/node", "tool.js", "build"]);
        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_unknown_command_shows_list_with_warning() {
        let (shell, calls) = recording_shell();
        let (outcome, out) = run(&shell, &["tool", "foo"]);

        assert_eq!(outcome, Outcome::Help(HelpReason::UnknownCommand("foo".into())));
        assert!(out.starts_with("Unknown command: \"foo\"\n\n"));
        assert!(out.contains("\n  build, b "));
        assert!(out.contains("Builds the project"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_no_command_shows_list() {
        let (shell, _) = recording_shell();
        let (outcome, out) = run(&shell, &["tool"]);

        assert_eq!(outcome, Outcome::Help(HelpReason::NoCommand));
        assert!(out.starts_with("Usage:\n  tool <command> <options>"));
        assert!(!out.contains("Unknown command"));
    }

    #[test]
    fn test_help_command_shows_command_usage() {
        let (shell, _) = recording_shell();
        let (outcome, out) = run(&shell, &["tool", "help", "build"]);

        assert_eq!(outcome, Outcome::Help(HelpReason::NoHandler));
        assert!(out.starts_with("Command Usage:\n  tool build <options>"));
        assert!(out.contains("-o, --o"));
        assert!(out.contains("desc"));
    }

    #[test]
    fn test_help_is_listed_first() {
        let (shell, _) = recording_shell();
        let (_, out) = run(&shell, &["tool"]);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[3], "Commands:");
        assert!(lines[4].starts_with("  help "));
        assert!(lines[4].ends_with("Learn about a command with tool help <command>"));
        assert!(lines[5].starts_with("  build, b "));
    }

    #[test]
    fn test_command_without_handler_shows_help() {
        let (shell, calls) = recording_shell();
        let (outcome, out) = run(&shell, &["tool", "clean"]);

        assert_eq!(outcome, Outcome::Help(HelpReason::NoHandler));
        assert!(out.starts_with("Usage:"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_result_carries_descriptor_and_input() {
        let (shell, _) = recording_shell();
        let argv = to_args(&["tool", "build", "-x", "mine"]);
        let mut out = Vec::<u8>::new();
        let result = shell.run(&argv, &mut out).unwrap();

        assert!(result.is_handled());
        assert_eq!(result.command_name.as_deref(), Some("build"));
        assert_eq!(
            result.descriptor.as_ref().map(|d| d.note.as_str()),
            Some("Builds the project")
        );
        assert_eq!(result.input.get_str("x"), Some("mine"));
    }

    #[test]
    fn test_repeated_runs_are_independent() {
        let (shell, calls) = recording_shell();
        run(&shell, &["tool", "build", "-o", "first"]);
        run(&shell, &["tool", "build"]);

        let calls = calls.borrow();
        assert_eq!(calls[0].1.get_str("o"), Some("first"));
        assert_eq!(calls[1].1.get_str("o"), Some("x"));
    }

    #[test]
    fn test_handler_error_propagates() {
        let shell = Shell::new(config()).handler("clean", |_, _, _| Err(anyhow!("disk full")));
        let result = shell.run(&to_args(&["tool", "clean"]), &mut Vec::<u8>::new());
        assert_eq!(result.unwrap_err().to_string(), "disk full");
    }

    #[test]
    fn test_program_name_and_version() {
        let shell = Shell::new(config());
        assert_eq!(shell.program_name(Some("/bin/other")), "tool");
        assert_eq!(shell.version(), Some("1.4.2"));
        assert!(shell.warnings().is_empty());
    }

    #[test]
    fn test_missing_manifest_degrades_help() {
        let dir = tempfile::tempdir().unwrap();
        let shell = Shell::new(ShellConfig::new().root(dir.path()));

        assert_eq!(shell.program_name(Some("/usr/bin/mytool")), "mytool");
        assert!(shell.version().is_none());

        let (outcome, out) = run(&shell, &["/usr/bin/mytool"]);
        assert_eq!(outcome, Outcome::Help(HelpReason::NoCommand));
        assert!(out.starts_with("No Cargo.toml in "));
        assert!(out.contains("Shellify config should declare at least one command."));
        assert!(out.contains("Usage:\n  mytool <command> <options>"));
    }

    #[test]
    fn test_help_names_the_program_of_each_run() {
        let dir = tempfile::tempdir().unwrap();
        let shell = Shell::new(
            ShellConfig::new()
                .root(dir.path())
                .command("build", CommandDescriptor::new("Builds")),
        );

        let (_, first) = run(&shell, &["/usr/bin/alpha"]);
        assert!(first.contains("Usage:\n  alpha <command> <options>"));
        assert!(first.contains("Learn about a command with alpha help <command>"));

        let (_, second) = run(&shell, &["/usr/bin/beta"]);
        assert!(second.contains("Usage:\n  beta <command> <options>"));
        assert!(second.contains("Learn about a command with beta help <command>"));
        assert!(!second.contains("alpha"));
    }

    #[test]
    fn test_warnings_are_written_before_a_handler_runs() {
        let dir = tempfile::tempdir().unwrap();
        let shell = Shell::new(
            ShellConfig::new()
                .root(dir.path())
                .command("build", CommandDescriptor::new("Builds")),
        )
        .handler("build", |_, _, _| Ok(()));

        let (outcome, out) = run(&shell, &["/usr/bin/mytool", "build"]);
        assert_eq!(outcome, Outcome::Handled);
        assert!(out.starts_with("No Cargo.toml in "));
        assert!(!out.contains("Usage:"));
    }

    #[test]
    fn test_package_read_from_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"fromdisk\"\nversion = \"0.9.0\"\n",
        )
        .unwrap();
        let shell = Shell::new(ShellConfig::new().root(dir.path()));

        assert_eq!(shell.program_name(None), "fromdisk");
        assert_eq!(shell.version(), Some("0.9.0"));
    }
}
