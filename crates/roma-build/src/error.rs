//! Error types for roma-build.

use miette::Diagnostic;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type for roma-build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while building, memory-checking, or cleaning a
/// project. All of them are terminal for the current invocation.
#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    /// No matching source files under the source directory.
    #[error("no source files found in {}", .dir.display())]
    #[diagnostic(help("expected .c files under the project's src directory or the project root"))]
    NoSources { dir: PathBuf },

    /// The compiler exited with a non-zero status.
    #[error("build failed: {compiler} exited with {status}")]
    BuildFailed {
        compiler: String,
        status: ExitStatus,
    },

    /// Valgrind exited with a non-zero status.
    #[error("valgrind failed: exited with {status}")]
    MemcheckFailed { status: ExitStatus },

    /// Requested language tag is not in the registry.
    #[error("language \"{0}\" is not supported")]
    #[diagnostic(help("supported languages: c, asm, cpp, py"))]
    UnsupportedLanguage(String),

    /// Placeholder toolchain was invoked.
    #[error("{0} support is not implemented yet")]
    NotImplemented(&'static str),

    /// A child process could not be started at all.
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not create the bin or log directory.
    #[error("failed to create {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not remove a directory during clean.
    #[error("failed to remove {}: {source}", .dir.display())]
    RemoveDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
