//! # shelfsim
//!
//! The application layer around `shelfsim-core`: command line, TOML
//! configuration, the worker/foreground bridge, text rendering, the
//! interactive shell and the HTTP API.

pub mod api;
pub mod cli;
pub mod config_file;
pub mod prompt;
pub mod render;
pub mod runner;
pub mod shell;
