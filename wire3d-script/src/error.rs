/// Errors raised while parsing or running a script
use thiserror::Error;
use wire3d_core::GeometryError;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("'{token}' is not a number")]
    MalformedNumericInput { token: String },
    #[error("expected {expected} arguments, found {found}")]
    ArgumentCount { expected: usize, found: usize },
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' is missing its argument line")]
    MissingArguments(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("failed to parse config: {0}")]
    ConfigFormat(#[from] serde_json::Error),
    #[error("line {line} ({command}): {source}")]
    Command {
        line: usize,
        command: String,
        #[source]
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    /// Attach the script position of the command that failed
    pub fn at(self, line: usize, command: &str) -> Self {
        ScriptError::Command {
            line,
            command: command.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, past any position wrappers
    pub fn root(&self) -> &ScriptError {
        match self {
            ScriptError::Command { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;
