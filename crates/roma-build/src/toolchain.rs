//! Language toolchain dispatch.
//!
//! Each supported language tag maps to a [`Toolchain`] implementation. Only
//! C is implemented today; the remaining tags are registered placeholders so
//! that an unknown tag and an unimplemented one fail differently.

use crate::c::CToolchain;
use crate::error::{BuildError, Result};
use crate::paths::ProjectPaths;
use std::fs;
use std::path::PathBuf;

/// Per-invocation settings parsed from the command line.
///
/// Built once by the CLI and handed to the selected toolchain; empty-string
/// overrides are treated the same as absent ones.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// Project root directory.
    pub project_dir: PathBuf,
    /// Requested compiler executable, validated against the language's
    /// allow-list.
    pub compiler: Option<String>,
    /// Compiler flags overriding the language defaults.
    pub flags: Option<String>,
    /// Output binary name overriding the default.
    pub target: Option<String>,
    /// Arguments passed to the binary when run under valgrind,
    /// whitespace-separated.
    pub target_options: String,
}

/// Languages roma knows about, keyed by their command-line tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Assembly,
    Cpp,
    Python,
}

impl Language {
    /// Look up a command-line tag in the fixed registry.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "c" => Some(Self::C),
            "asm" => Some(Self::Assembly),
            "cpp" => Some(Self::Cpp),
            "py" => Some(Self::Python),
            _ => None,
        }
    }

    /// Human-readable language name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Assembly => "Assembly",
            Self::Cpp => "C++",
            Self::Python => "Python",
        }
    }
}

/// One language's build/memcheck/clean operations.
///
/// A toolchain is constructed per invocation and used for exactly one
/// operation.
pub trait Toolchain {
    /// Compile the project, returning the path of the produced binary.
    fn build(&self) -> Result<PathBuf>;

    /// Build, then run the binary under valgrind. Returns the path of the
    /// valgrind log. The build is re-run every time so the checked binary
    /// is always current.
    fn memcheck(&self) -> Result<PathBuf>;

    /// Remove the bin and log directories. Returns whether anything was
    /// actually removed.
    fn clean(&self) -> Result<bool>;
}

/// Resolve a language tag to its toolchain.
///
/// An unknown tag fails here, before any toolchain is constructed.
pub fn toolchain_for(tag: &str, config: ProjectConfig) -> Result<Box<dyn Toolchain>> {
    let language =
        Language::from_tag(tag).ok_or_else(|| BuildError::UnsupportedLanguage(tag.to_string()))?;

    Ok(match language {
        Language::C => Box::new(CToolchain::new(config)),
        Language::Assembly | Language::Cpp | Language::Python => {
            Box::new(Unimplemented::new(language))
        }
    })
}

/// Remove the bin and log directories if present.
///
/// Shared by every toolchain's clean operation; returns whether anything
/// was removed.
pub(crate) fn clean_dirs(paths: &ProjectPaths) -> Result<bool> {
    let mut cleaned = false;

    for dir in [&paths.binary_dir, &paths.log_dir] {
        if dir.is_dir() {
            fs::remove_dir_all(dir).map_err(|source| BuildError::RemoveDir {
                dir: dir.clone(),
                source,
            })?;
            cleaned = true;
        }
    }

    Ok(cleaned)
}

/// Placeholder for languages that are registered but not implemented.
pub struct Unimplemented {
    language: Language,
}

impl Unimplemented {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl Toolchain for Unimplemented {
    fn build(&self) -> Result<PathBuf> {
        Err(BuildError::NotImplemented(self.language.name()))
    }

    fn memcheck(&self) -> Result<PathBuf> {
        Err(BuildError::NotImplemented(self.language.name()))
    }

    fn clean(&self) -> Result<bool> {
        Err(BuildError::NotImplemented(self.language.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_all_tags() {
        assert_eq!(Language::from_tag("c"), Some(Language::C));
        assert_eq!(Language::from_tag("asm"), Some(Language::Assembly));
        assert_eq!(Language::from_tag("cpp"), Some(Language::Cpp));
        assert_eq!(Language::from_tag("py"), Some(Language::Python));
        assert_eq!(Language::from_tag("rust"), None);
    }

    #[test]
    fn unknown_tag_names_the_tag() {
        let err = toolchain_for("fortran", ProjectConfig::default()).err().unwrap();
        match err {
            BuildError::UnsupportedLanguage(tag) => assert_eq!(tag, "fortran"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stub_languages_fail_every_operation() {
        let toolchain = toolchain_for("cpp", ProjectConfig::default()).unwrap();

        for result in [toolchain.build(), toolchain.memcheck()] {
            match result {
                Err(BuildError::NotImplemented(name)) => assert_eq!(name, "C++"),
                other => panic!("unexpected result: {other:?}"),
            }
        }
        assert!(matches!(
            toolchain.clean(),
            Err(BuildError::NotImplemented("C++"))
        ));
    }

    #[test]
    fn clean_reports_nothing_to_do() {
        let root = tempfile::TempDir::new().unwrap();
        let paths = ProjectPaths::resolve(root.path());

        assert!(!clean_dirs(&paths).unwrap());
        assert!(!root.path().join("bin").exists());
        assert!(!root.path().join("log").exists());
    }

    #[test]
    fn clean_removes_existing_directories() {
        let root = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("bin")).unwrap();
        std::fs::write(root.path().join("bin/demo"), b"").unwrap();
        std::fs::create_dir(root.path().join("log")).unwrap();

        let paths = ProjectPaths::resolve(root.path());
        assert!(clean_dirs(&paths).unwrap());
        assert!(!root.path().join("bin").exists());
        assert!(!root.path().join("log").exists());
    }
}
