//! The C toolchain: gcc/clang builds and valgrind memory checks.
//!
//! Command lines are assembled separately from process spawning so tests
//! can assert the exact argument vectors without a compiler installed.

use crate::error::{BuildError, Result};
use crate::paths::ProjectPaths;
use crate::toolchain::{clean_dirs, ProjectConfig, Toolchain};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use walkdir::WalkDir;

/// Accepted compiler executables, in fallback order.
const COMPILERS: [&str; 2] = ["gcc", "clang"];

/// Default compile flags when `--flags` is not given.
const DEFAULT_FLAGS: &str = "-Wall -Wextra -Werror -Wpedantic -g -std=c11";

/// Target name when the project directory has no usable basename.
const FALLBACK_TARGET: &str = "a.out";

/// File name of the valgrind report inside the log directory.
const VALGRIND_LOG: &str = "valgrind.txt";

/// Builds C projects and runs them under valgrind.
pub struct CToolchain {
    paths: ProjectPaths,
    compiler: String,
    flags: String,
    target: String,
    target_options: String,
}

impl CToolchain {
    /// Apply the C defaults to a parsed configuration.
    ///
    /// An unrecognized or absent compiler silently falls back to the first
    /// allow-listed one; flags and target fall back to their fixed
    /// defaults.
    pub fn new(config: ProjectConfig) -> Self {
        let paths = ProjectPaths::resolve(&config.project_dir);

        let compiler = match config.compiler {
            Some(name) if COMPILERS.contains(&name.as_str()) => name,
            _ => COMPILERS[0].to_string(),
        };

        let flags = config
            .flags
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FLAGS.to_string());

        let target = config
            .target
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| default_target(&paths));

        Self {
            paths,
            compiler,
            flags,
            target,
            target_options: config.target_options,
        }
    }

    /// Path of the binary this toolchain produces.
    pub fn binary_path(&self) -> PathBuf {
        self.paths.binary_dir.join(&self.target)
    }

    /// Path of the valgrind report this toolchain writes.
    pub fn log_path(&self) -> PathBuf {
        self.paths.log_dir.join(VALGRIND_LOG)
    }

    /// All `.c` files under the source directory, sorted so assembled
    /// command lines are deterministic.
    fn source_files(&self) -> Vec<PathBuf> {
        let mut sources: Vec<PathBuf> = WalkDir::new(&self.paths.src_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "c"))
            .map(|entry| entry.into_path())
            .collect();
        sources.sort();
        sources
    }

    /// Compiler arguments: flags, optional include flag, output pair,
    /// sources, in that order.
    fn compile_args(&self, sources: &[PathBuf]) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.flags.split_whitespace().map(Into::into).collect();
        if let Some(include) = self.paths.include_flag() {
            args.push(include.into());
        }
        args.push("-o".into());
        args.push(self.binary_path().into_os_string());
        args.extend(sources.iter().map(|src| src.clone().into_os_string()));
        args
    }

    /// Valgrind arguments: leak-check flags, the binary, then the
    /// user-supplied target options split on whitespace.
    fn memcheck_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--leak-check=full".into(),
            "--show-leak-kinds=all".into(),
            format!("--log-file={}", self.log_path().display()).into(),
        ];
        args.push(self.binary_path().into_os_string());
        args.extend(self.target_options.split_whitespace().map(Into::into));
        args
    }
}

impl Toolchain for CToolchain {
    fn build(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.paths.binary_dir).map_err(|source| BuildError::CreateDir {
            dir: self.paths.binary_dir.clone(),
            source,
        })?;

        let sources = self.source_files();
        if sources.is_empty() {
            return Err(BuildError::NoSources {
                dir: self.paths.src_dir.clone(),
            });
        }

        let status = Command::new(&self.compiler)
            .args(self.compile_args(&sources))
            .status()
            .map_err(|source| BuildError::Spawn {
                tool: self.compiler.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::BuildFailed {
                compiler: self.compiler.clone(),
                status,
            });
        }

        Ok(self.binary_path())
    }

    fn memcheck(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.paths.log_dir).map_err(|source| BuildError::CreateDir {
            dir: self.paths.log_dir.clone(),
            source,
        })?;

        // Always rebuild so the checked binary is current.
        self.build()?;

        let status = Command::new("valgrind")
            .args(self.memcheck_args())
            .status()
            .map_err(|source| BuildError::Spawn {
                tool: "valgrind".to_string(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::MemcheckFailed { status });
        }

        Ok(self.log_path())
    }

    fn clean(&self) -> Result<bool> {
        clean_dirs(&self.paths)
    }
}

/// Default target name: the project directory's basename, or `a.out` when
/// the project is the current directory.
fn default_target(paths: &ProjectPaths) -> String {
    paths
        .project_dir
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_TARGET.to_string())
}
