// src/cli/handlers/init.rs

//! `shellify init`: writes the boilerplate of a new command-line tool.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    models::{CommandDescriptor, OptionSpec, ResolvedInput},
    system::fs::mkdirp_default,
};

/// Schema key of the `-f, --force` option.
pub const FORCE_OPTION: &str = "force";
/// Schema key of the `-d, --dir` option.
pub const DIR_OPTION: &str = "dir";

const CONFIG_TEMPLATE: &str = r#"# Commands and options of your command-line tool.
# Options are written as "<help text>|<default value>".

[options]
v_verbose = "Print more output"

[commands.hello]
note = "Prints a greeting"
options = { n_name = "Who to greet|world" }
"#;

const MAIN_TEMPLATE: &str = r#"use shellify::{Shell, ShellConfig};

mod commands;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ShellConfig::from_toml_str(include_str!("../shellify.toml"))?
        .package(shellify::PackageInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));

    Shell::new(config)
        .handler("hello", commands::hello::run)
        .run_env()?;
    Ok(())
}
"#;

const COMMANDS_MOD_TEMPLATE: &str = "pub mod hello;\n";

const HELLO_TEMPLATE: &str = r#"use shellify::{CommandDescriptor, ResolvedInput};

pub fn run(input: &ResolvedInput, _command: &CommandDescriptor, _name: &str) -> anyhow::Result<()> {
    let name = input.get_str("n_name").unwrap_or("world");
    println!("Hello, {}!", name);
    Ok(())
}
"#;

/// The boilerplate files written by `init`, relative to the target directory.
const FILES: &[(&str, &str)] = &[
    ("shellify.toml", CONFIG_TEMPLATE),
    ("src/main.rs", MAIN_TEMPLATE),
    ("src/commands/mod.rs", COMMANDS_MOD_TEMPLATE),
    ("src/commands/hello.rs", HELLO_TEMPLATE),
];

/// What `init` did with one boilerplate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// The file did not exist.
    Created(PathBuf),
    /// The file existed and was replaced.
    Overwritten(PathBuf),
    /// The file existed and was left alone.
    Skipped(PathBuf),
}

/// The descriptor of the `init` command.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new(t!("init.note"))
        .option(FORCE_OPTION, OptionSpec::new(t!("init.option.force")))
        .option(DIR_OPTION, t!("init.option.dir"))
}

/// The main handler for the `init` command.
/// Writes the boilerplate of a new shellify-based tool into the target directory.
pub fn handle(input: &ResolvedInput, _descriptor: &CommandDescriptor, _name: &str) -> Result<()> {
    let dir = input.get_str(DIR_OPTION).unwrap_or(".");
    let root = PathBuf::from(shellexpand::tilde(dir).into_owned());
    let force = input.is_set(FORCE_OPTION);
    log::debug!("Initializing '{}' (force: {})", root.display(), force);

    let actions = init_project(&root, force, &mut confirm_overwrite)?;

    for action in &actions {
        match action {
            FileAction::Created(path) | FileAction::Overwritten(path) => {
                let line = t!("init.created").replace("{path}", &path.display().to_string());
                println!("{}", line.green());
            }
            FileAction::Skipped(path) => {
                let line = t!("init.skipped").replace("{path}", &path.display().to_string());
                println!("{}", line.yellow());
            }
        }
    }
    let done = t!("init.done").replace("{path}", &dunce::simplified(&root).display().to_string());
    println!("\n{}", done.bold());
    Ok(())
}

/// Creates the boilerplate directories and files under `root`.
///
/// Existing files are left alone unless `force` is set or `confirm` approves overwriting them.
pub fn init_project(
    root: &Path,
    force: bool,
    confirm: &mut dyn FnMut(&Path) -> Result<bool>,
) -> Result<Vec<FileAction>> {
    let commands_dir = root.join("src").join("commands");
    mkdirp_default(&commands_dir)
        .with_context(|| format!("Could not prepare '{}'", root.display()))?;

    let mut actions = Vec::with_capacity(FILES.len());
    for (relative, content) in FILES {
        let path = root.join(relative);
        let existed = path.exists();
        if existed && !force && !confirm(&path)? {
            actions.push(FileAction::Skipped(path));
            continue;
        }

        fs::write(&path, content)
            .with_context(|| format!("Could not write '{}'", path.display()))?;
        actions.push(if existed {
            FileAction::Overwritten(path)
        } else {
            FileAction::Created(path)
        });
    }

    Ok(actions)
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    let prompt = t!("init.confirm_overwrite").replace("{path}", &path.display().to_string());
    match Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
    {
        Ok(answer) => Ok(answer),
        Err(e) => {
            // Without a terminal there is no one to ask, so the existing file is kept.
            log::debug!("Could not prompt for '{}': {}", path.display(), e);
            Ok(false)
        }
    }
}
