//! A minimal framework for declarative command-line tools.
//!
//! Commands and their options are declared in a `ShellConfig`. A `Shell` resolves the process
//! arguments against those declarations, calls the handler of the invoked command, and falls
//! back to a generated help screen when there is nothing to call.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;

pub use crate::cli::{
    Handler, Shell,
    dispatcher::{DispatchResult, HelpReason, Outcome},
};
pub use crate::core::{config::ShellConfig, resolver::resolve};
pub use crate::models::{
    CommandDescriptor, CommandRegistry, InputValue, OptionSchema, OptionSpec, PackageInfo,
    ResolvedInput,
};
pub use crate::system::fs::mkdirp;
