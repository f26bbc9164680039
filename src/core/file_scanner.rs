use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::core::{dialect::Language, parsers::aspx::is_markup_file};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Files found under the source root, sorted by path.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Code files (`.cs`, `.vb`) and markup files with embedded code.
    pub sources: BTreeSet<String>,
    /// Resource containers (`.resx`).
    pub resources: BTreeSet<String>,
    pub skipped_count: usize,
}

enum FileKind {
    Source,
    Resource,
}

fn classify(path: &Path) -> Option<FileKind> {
    if Language::from_path(path).is_some() || is_markup_file(path) {
        return Some(FileKind::Source);
    }
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|ext| ext.eq_ignore_ascii_case("resx"))
        .map(|_| FileKind::Resource)
}

fn warn(verbose: bool, message: std::fmt::Arguments<'_>) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn(verbose, format_args!("Invalid ignore pattern '{}': {}", p, e)),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                    Err(e) => warn(verbose, format_args!("Invalid glob pattern '{}': {}", inc, e)),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn(
                        verbose,
                        format_args!("Include path does not exist: {}", path.display()),
                    );
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    warn(verbose, format_args!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
                || glob_patterns.iter().any(|p| p.matches(&path_str))
            {
                continue;
            }
            if !path.is_file() {
                continue;
            }

            match classify(path) {
                Some(FileKind::Source) => {
                    result.sources.insert(path_str.into_owned());
                }
                Some(FileKind::Resource) => {
                    result.resources.insert(path_str.into_owned());
                }
                None => {}
            }
        }
    }

    tracing::debug!(
        sources = result.sources.len(),
        resources = result.resources.len(),
        skipped = result.skipped_count,
        "scanned files"
    );
    result
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_scan_sorts_files_by_kind() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("Program.cs")).unwrap();
        File::create(dir_path.join("Module1.vb")).unwrap();
        File::create(dir_path.join("Default.aspx")).unwrap();
        File::create(dir_path.join("Strings.resx")).unwrap();
        File::create(dir_path.join("app.config")).unwrap();

        let result = scan_files(dir_path, &[], &[], false);

        assert_eq!(result.sources.len(), 3);
        assert_eq!(result.resources.len(), 1);
        assert!(!result.sources.iter().any(|f| f.ends_with("app.config")));
    }

    #[test]
    fn test_scan_ignores_build_output() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let obj = dir_path.join("obj").join("Debug");
        fs::create_dir_all(&obj).unwrap();
        File::create(obj.join("AssemblyInfo.cs")).unwrap();
        File::create(dir_path.join("Program.cs")).unwrap();

        let result = scan_files(dir_path, &[], &["**/obj/**".to_owned()], false);

        assert_eq!(result.sources.len(), 1);
        assert!(result.sources.iter().all(|f| f.ends_with("Program.cs")));
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let web = dir_path.join("Web");
        fs::create_dir(&web).unwrap();
        File::create(web.join("Page.aspx")).unwrap();

        let tools = dir_path.join("Tools");
        fs::create_dir(&tools).unwrap();
        File::create(tools.join("Tool.cs")).unwrap();

        let includes = ["Web".to_owned(), "Missing".to_owned()];
        let result = scan_files(dir_path, &includes, &[], false);

        assert_eq!(result.sources.len(), 1);
        assert!(result.sources.iter().any(|f| f.ends_with("Page.aspx")));
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let a = dir_path.join("src").join("A");
        let b = dir_path.join("src").join("B");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        File::create(a.join("A.cs")).unwrap();
        File::create(b.join("B.resx")).unwrap();
        File::create(dir_path.join("Root.cs")).unwrap();

        let result = scan_files(dir_path, &["src/*".to_owned()], &[], false);

        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.resources.len(), 1);
        assert!(!result.sources.iter().any(|f| f.ends_with("Root.cs")));
    }

    #[test]
    fn test_scan_ignores_literal_directory_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let legacy = dir_path.join("Legacy");
        fs::create_dir(&legacy).unwrap();
        File::create(legacy.join("Old.vb")).unwrap();
        File::create(dir_path.join("New.vb")).unwrap();

        let result = scan_files(dir_path, &[], &["Legacy".to_owned()], false);

        assert_eq!(result.sources.len(), 1);
        assert!(result.sources.iter().any(|f| f.ends_with("New.vb")));
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/*"));
        assert!(is_glob_pattern("**/*.Designer.cs"));
        assert!(!is_glob_pattern("Properties"));
    }
}
