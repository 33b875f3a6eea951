//! Project directory layout resolution.
//!
//! roma assumes the conventional C project shape: sources under `src/`,
//! headers under `include/`, build output under `bin/`, valgrind reports
//! under `log/`. Projects without `src/` or `include/` degrade gracefully
//! to compiling straight out of the project root.

use std::path::{Path, PathBuf};

/// Directory paths derived from a project root.
///
/// Resolution is pure path computation; the only filesystem probes are the
/// `is_dir` checks for the optional `src` and `include` subdirectories.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// The project root as given on the command line.
    pub project_dir: PathBuf,
    /// `<root>/src` if it exists, otherwise the project root itself.
    pub src_dir: PathBuf,
    /// `<root>/include`, whether or not it exists.
    pub include_dir: PathBuf,
    /// `<root>/bin`, created on demand by builds.
    pub binary_dir: PathBuf,
    /// `<root>/log`, created on demand by memory checks.
    pub log_dir: PathBuf,
}

impl ProjectPaths {
    /// Resolve the layout for a project root.
    pub fn resolve(project_dir: &Path) -> Self {
        let src = project_dir.join("src");
        let src_dir = if src.is_dir() {
            src
        } else {
            project_dir.to_path_buf()
        };

        Self {
            project_dir: project_dir.to_path_buf(),
            src_dir,
            include_dir: project_dir.join("include"),
            binary_dir: project_dir.join("bin"),
            log_dir: project_dir.join("log"),
        }
    }

    /// `-I<include_dir>` when the include directory exists. Absent rather
    /// than empty, so no empty token ever reaches a command line.
    pub fn include_flag(&self) -> Option<String> {
        if self.include_dir.is_dir() {
            Some(format!("-I{}", self.include_dir.display()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn src_subdirectory_is_preferred() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("src")).unwrap();

        let paths = ProjectPaths::resolve(root.path());
        assert_eq!(paths.src_dir, root.path().join("src"));
    }

    #[test]
    fn missing_src_falls_back_to_root() {
        let root = TempDir::new().unwrap();

        let paths = ProjectPaths::resolve(root.path());
        assert_eq!(paths.src_dir, root.path());
    }

    #[test]
    fn include_flag_only_when_directory_exists() {
        let root = TempDir::new().unwrap();
        let paths = ProjectPaths::resolve(root.path());
        assert_eq!(paths.include_flag(), None);

        std::fs::create_dir(root.path().join("include")).unwrap();
        let paths = ProjectPaths::resolve(root.path());
        let flag = paths.include_flag().unwrap();
        assert!(flag.starts_with("-I"));
        assert!(flag.ends_with("include"));
    }

    #[test]
    fn current_directory_layout() {
        let paths = ProjectPaths::resolve(Path::new("."));
        assert_eq!(paths.binary_dir, PathBuf::from("./bin"));
        assert_eq!(paths.log_dir, PathBuf::from("./log"));
    }

    #[test]
    fn output_directories_are_rooted_at_project() {
        let paths = ProjectPaths::resolve(Path::new("demo"));
        assert_eq!(paths.binary_dir, PathBuf::from("demo/bin"));
        assert_eq!(paths.log_dir, PathBuf::from("demo/log"));
    }
}
