/// wire3d script layer - parses wireframe scripts and runs them
///
/// Turns script text into typed commands, drives the core edge matrix and
/// rasterizer with them, and writes or previews the resulting image.

pub mod command;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod output;
pub mod parser;
pub mod preview;

// Re-export commonly used types
pub use command::{Command, Statement};
pub use config::Config;
pub use error::{Result, ScriptError};
pub use interpreter::{Flow, Session};
pub use parser::parse_script;
pub use preview::TerminalPreview;
