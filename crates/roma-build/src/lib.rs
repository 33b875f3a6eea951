//! Project layout resolution and toolchain invocation for roma.
//!
//! This crate owns everything below the command line: deriving the
//! `src`/`include`/`bin`/`log` layout from a project root, applying
//! per-language defaults, assembling compiler and valgrind command lines,
//! and running them as child processes.
//!
//! The CLI crate picks a toolchain through [`toolchain_for`] and invokes
//! exactly one operation on it.

mod c;
mod error;
mod paths;
mod toolchain;

pub use c::CToolchain;
pub use error::{BuildError, Result};
pub use paths::ProjectPaths;
pub use toolchain::{toolchain_for, Language, ProjectConfig, Toolchain};
