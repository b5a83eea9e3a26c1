// src/core/config.rs

//! # Shell Configuration
//!
//! The declarative description of a command-line tool: its commands, the options shared by
//! every command, and where to find the package manifest that names the program. A
//! configuration is built in code with the builder methods, or deserialized from a TOML
//! document compiled into the program (`include_str!`), in which options use the packed
//! `"<help>|<default>"` form. Nothing here looks for configuration files at runtime.

use crate::{
    constants::MANIFEST_FILENAME,
    models::{CommandDescriptor, CommandRegistry, OptionSchema, OptionSpec, PackageInfo},
};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised while building a configuration or reading package metadata.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The embedded TOML document does not describe a configuration.
    #[error("Invalid shell configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// The manifest could not be read.
    #[error("Could not read manifest '{path}': {source}")]
    ManifestRead {
        /// Path of the manifest.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not valid TOML.
    #[error("Could not parse manifest '{path}': {source}")]
    ManifestParse {
        /// Path of the manifest.
        path: String,
        /// The underlying error.
        #[source]
        source: toml::de::Error,
    },
    /// The manifest is a virtual workspace manifest.
    #[error("Manifest '{0}' has no [package] table.")]
    ManifestMissingPackage(String),
}

/// The configuration of one command-line tool.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ShellConfig {
    /// Program name used when no package metadata can be found.
    #[serde(default)]
    pub name: Option<String>,
    /// Directory holding the package manifest. Defaults to the current directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Package metadata supplied up front, which skips reading the manifest.
    #[serde(default)]
    pub package: Option<PackageInfo>,
    /// The registered commands, in help order.
    #[serde(default)]
    pub commands: CommandRegistry,
    /// Options accepted by every command. A command's own option with the same key wins.
    #[serde(default)]
    pub options: OptionSchema,
}

impl ShellConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a TOML document.
    ///
    /// ```toml
    /// name = "deploy"
    ///
    /// [options]
    /// verbose = "Print every step"
    ///
    /// [commands.push]
    /// note = "Pushes the current build"
    /// alias = "p"
    /// options = { t_target = "Target environment|staging" }
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Sets the fallback program name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the directory the manifest is read from.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Supplies package metadata directly, usually from `env!("CARGO_PKG_NAME")` and
    /// `env!("CARGO_PKG_VERSION")`.
    pub fn package(mut self, package: PackageInfo) -> Self {
        self.package = Some(package);
        self
    }

    /// Registers a command. Commands are listed in help in registration order.
    pub fn command(mut self, name: impl Into<String>, descriptor: CommandDescriptor) -> Self {
        self.commands.insert(name.into(), descriptor);
        self
    }

    /// Declares an option shared by every command.
    pub fn option(mut self, key: impl Into<String>, spec: impl Into<OptionSpec>) -> Self {
        self.options.insert(key.into(), spec.into());
        self
    }

    /// The directory the manifest is read from.
    pub fn root_dir(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
}

#[derive(Deserialize)]
struct ManifestPackage {
    name: String,
    // A plain string, or an inherited `{ workspace = true }` table.
    #[serde(default)]
    version: Option<toml::Value>,
}

/// Reads the `[package]` name and version from the `Cargo.toml` in `root`.
pub fn load_package_info(root: &Path) -> Result<PackageInfo, ConfigError> {
    let path = root.join(MANIFEST_FILENAME);
    let display = path.display().to_string();
    log::debug!("Loading package metadata from '{}'", display);

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::ManifestRead {
        path: display.clone(),
        source,
    })?;
    let manifest: Manifest =
        toml::from_str(&content).map_err(|source| ConfigError::ManifestParse {
            path: display.clone(),
            source,
        })?;

    let package = manifest
        .package
        .ok_or(ConfigError::ManifestMissingPackage(display))?;

    Ok(PackageInfo {
        name: package.name,
        version: package
            .version
            .and_then(|version| version.as_str().map(str::to_string)),
    })
}
