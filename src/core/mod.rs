// src/core/mod.rs

//! Argument resolution, flag naming, help rendering and configuration.

pub mod config;
pub mod flags;
pub mod help;
pub mod resolver;
