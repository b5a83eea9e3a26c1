//! # System Interaction Layer
//!
//! Helpers that touch the filesystem on behalf of command handlers. The argument resolver and
//! the help renderer never do I/O.
//!
//! ## Modules
//!
//! - **`fs`**: `mkdirp`, recursive directory creation in the manner of `mkdir -p`.

pub mod fs;
