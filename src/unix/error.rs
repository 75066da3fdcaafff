use std::{ffi::OsString, io, path::PathBuf};

/// Exit status for caller mistakes.
pub const EXIT_USAGE: u8 = 2;
/// Exit status when the interpreter could not be started, as a shell reports "command not found".
pub const EXIT_EXEC_FAILED: u8 = 127;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("usage: {program} <interpreter> <script> [args...]")]
    Usage { program: String },

    #[error("empty interpreter specification")]
    EmptyInterpreter,

    #[error("too many levels of symbolic links resolving {}", path.display())]
    TooManyLinks { path: PathBuf },

    #[error("argument contains a NUL byte: {}", arg.to_string_lossy())]
    InvalidArgument { arg: OsString },

    #[error("failed to execute {}: {source}", path.display())]
    Exec { path: PathBuf, source: io::Error },
}

impl Error {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage { .. } | Self::EmptyInterpreter => EXIT_USAGE,
            Self::TooManyLinks { .. } | Self::InvalidArgument { .. } | Self::Exec { .. } => {
                EXIT_EXEC_FAILED
            }
        }
    }

    /// The single stderr line printed before exiting.
    #[must_use]
    pub fn diagnostic(&self, program: &str) -> String {
        match self {
            Self::Usage { .. } => self.to_string(),
            Self::EmptyInterpreter => Self::Usage {
                program: program.to_owned(),
            }
            .to_string(),
            _ => format!("{program}: {self}"),
        }
    }
}
