//! Build manifest handling for the kiln build runner.
//!
//! This crate provides:
//! - The build manifest format (`compile_command.json`, TOML variant)
//! - Compile command assembly from a manifest
//!
//! # Example
//!
//! ```json
//! {
//!     "main": "main.c",
//!     "programs": ["repl.c"],
//!     "modules": ["lexer.c", "vm.c"],
//!     "output": "demo"
//! }
//! ```

mod command;
mod config;
mod error;

pub use command::CompileCommand;
pub use config::BuildSpec;
pub use error::{BuildError, Result};
