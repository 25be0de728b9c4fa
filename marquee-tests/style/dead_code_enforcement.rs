//! Dead Code and Panic Enforcement
//!
//! Production code must not silence dead code warnings or panic on
//! `Result`/`Option` values. Test modules, test fixtures and test crates are
//! exempt. The scan stops at the first `#[cfg(test)]` line of each file.

use std::fs;
use std::path::{Path, PathBuf};

/// Directories that never contain workspace production code.
const SKIPPED_DIRS: &[&str] = &["target", "examples", "logs"];

/// A rule violation found in production code
#[derive(Debug)]
struct Violation {
    file_path: String,
    line_number: usize,
    rule: &'static str,
    context: String,
}

/// Scans workspace sources for banned patterns
struct ProductionCodeChecker {
    violations: Vec<Violation>,
    files_checked: usize,
}

impl ProductionCodeChecker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
            files_checked: 0,
        }
    }

    fn find_rust_files(dir: &Path, files: &mut Vec<PathBuf>, depth: usize) -> std::io::Result<()> {
        if depth > 10 || !dir.is_dir() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_str()) {
                continue;
            }

            if path.is_dir() {
                Self::find_rust_files(&path, files, depth + 1)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        Ok(())
    }

    /// Whether a path holds test code only
    fn is_test_file(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();

        path_str.contains("marquee-tests")
            || path_str.contains("/tests/")
            || path_str.contains("test_")
            || path_str.ends_with("_tests.rs")
    }

    /// Collects violations in one file's production section
    fn scan_source(&mut self, path: &str, content: &str) {
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.starts_with("#[cfg(test)]") {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }

            let rule = if trimmed.contains("#[allow(") && trimmed.contains("dead_code") {
                Some("dead code allowance")
            } else if trimmed.contains(".unwrap()") || trimmed.contains(".expect(") {
                Some("panicking unwrap")
            } else {
                None
            };

            if let Some(rule) = rule {
                self.violations.push(Violation {
                    file_path: path.to_string(),
                    line_number: index + 1,
                    rule,
                    context: trimmed.to_string(),
                });
            }
        }
    }

    fn check_workspace(&mut self, root: &Path) -> std::io::Result<()> {
        let mut files = Vec::new();
        Self::find_rust_files(root, &mut files, 0)?;

        for file in files.iter().filter(|file| !Self::is_test_file(file)) {
            let content = fs::read_to_string(file)?;
            self.files_checked += 1;
            self.scan_source(&file.to_string_lossy(), &content);
        }
        Ok(())
    }

    fn report(&self) -> bool {
        if self.violations.is_empty() {
            println!(
                "Production code enforcement: {} files checked, no violations found",
                self.files_checked
            );
            return true;
        }

        for violation in &self.violations {
            println!(
                "{}:{} [{}]\n  {}",
                violation.file_path, violation.line_number, violation.rule, violation.context
            );
        }
        println!(
            "Found {} violation(s) in {} file(s) checked. Propagate errors with `?` \
             and delete unused code instead of silencing it.",
            self.violations.len(),
            self.files_checked
        );

        false
    }
}
