use glob::Pattern;
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::data::SearchMatch;
use crate::utils::error::{AppError, AppResult};

/// Options for a search run.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Directory the walk starts from.
    pub root: PathBuf,
    /// Glob matched against file names only.
    pub glob: String,
    /// Treat the pattern as a literal string.
    pub fixed_strings: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            glob: "*.py".to_string(),
            fixed_strings: false,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn glob(mut self, glob: &str) -> Self {
        self.glob = glob.to_string();
        self
    }

    pub fn fixed_strings(mut self) -> Self {
        self.fixed_strings = true;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    pub files_scanned: usize,
    /// Files that matched the glob but could not be read.
    pub files_skipped: usize,
}

/// Case-insensitive line search over files selected by name.
pub struct SearchEngine {
    matcher: Regex,
    glob: Pattern,
    root: PathBuf,
}

impl SearchEngine {
    pub fn new(pattern: &str, options: &SearchOptions) -> AppResult<Self> {
        let source = if options.fixed_strings {
            regex::escape(pattern)
        } else {
            pattern.to_string()
        };

        let matcher = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::Pattern(e.to_string()))?;

        let glob = Pattern::new(&options.glob)
            .map_err(|e| AppError::Pattern(format!("glob '{}': {}", options.glob, e)))?;

        Ok(Self {
            matcher,
            glob,
            root: options.root.clone(),
        })
    }

    /// Files under the root whose name matches the glob, in walk order.
    /// Entries are visited sorted by name. Symlinked directories are not
    /// descended into; a symlink to a regular file is searched like `find`
    /// plus `grep` would.
    pub fn files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
            })
            .filter(|entry| self.glob.matches(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.into_path())
            .collect()
    }

    pub fn search_text(&self, path: &Path, text: &str) -> Vec<SearchMatch> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| self.matcher.is_match(line))
            .map(|(index, line)| SearchMatch {
                path: path.to_path_buf(),
                line_number: index + 1,
                line: line.to_string(),
                spans: self
                    .matcher
                    .find_iter(line)
                    .filter(|m| !m.is_empty())
                    .map(|m| (m.start(), m.end()))
                    .collect(),
            })
            .collect()
    }

    pub fn search_file(&self, path: &Path) -> AppResult<Vec<SearchMatch>> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(self.search_text(path, &String::from_utf8_lossy(&bytes)))
    }

    pub fn run(&self) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();

        for path in self.files() {
            outcome.files_scanned += 1;
            match self.search_file(&path) {
                Ok(found) => outcome.matches.extend(found),
                Err(e) => {
                    warn!(error = %e, "skipping file");
                    outcome.files_skipped += 1;
                }
            }
        }

        debug!(
            files = outcome.files_scanned,
            matches = outcome.matches.len(),
            "search finished"
        );
        outcome
    }
}
