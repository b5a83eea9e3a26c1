// src/cli/handlers/mod.rs

//! Handlers for the commands of the `shellify` binary itself.

pub mod init;
