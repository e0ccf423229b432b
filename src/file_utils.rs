use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File and directory utilities: glob matching and source-tree enumeration.

/// File operations utility
pub struct FileManager;

impl FileManager {
    /// Check directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Enumerate files under `root` matching the include globs and none of
    /// the exclude globs.
    ///
    /// Globs are matched against the `/`-separated path relative to `root`.
    /// The returned list holds absolute paths in a stable traversal order, so
    /// a run over a fixed tree is reproducible.
    pub fn collect_files<P: AsRef<Path>>(
        root: P,
        includes: &[String],
        excludes: &[String],
    ) -> Result<Vec<PathBuf>> {
        let root = root
            .as_ref()
            .canonicalize()
            .with_context(|| format!("Failed to resolve directory: {:?}", root.as_ref()))?;

        let include_patterns: Vec<Regex> = includes
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| compile_glob(p))
            .collect::<Result<_>>()?;

        let exclude_patterns: Vec<Regex> = excludes
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| compile_glob(p))
            .collect::<Result<_>>()?;

        let mut result = Vec::new();

        for entry in WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(&root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            let relative = normalize_separators(relative);

            let included = include_patterns.iter().any(|p| p.is_match(&relative));
            let excluded = exclude_patterns.iter().any(|p| p.is_match(&relative));

            if included && !excluded {
                result.push(entry.path().to_path_buf());
            }
        }

        Ok(result)
    }
}

/// Forward-slash form of a relative path, for glob matching
fn normalize_separators(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Compile a glob pattern into an anchored regex.
///
/// `**` crosses directory separators, `*` and `?` stay within one path
/// segment, and a leading `**/` also matches entries at the root.
pub fn compile_glob(pattern: &str) -> Result<Regex> {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');

    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    if chars.get(i + 2) == Some(&'/') {
                        // `**/` matches zero or more whole segments
                        regex.push_str("(?:.*/)?");
                        i += 3;
                    } else {
                        regex.push_str(".*");
                        i += 2;
                    }
                } else {
                    regex.push_str("[^/]*");
                    i += 1;
                }
            }
            '?' => {
                regex.push_str("[^/]");
                i += 1;
            }
            c => {
                regex.push_str(&regex::escape(&c.to_string()));
                i += 1;
            }
        }
    }

    regex.push('$');
    Regex::new(&regex).with_context(|| format!("Invalid glob pattern: {}", pattern))
}
