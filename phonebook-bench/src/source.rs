//! Line-oriented inputs: the directory (`<key> <name>` per line) and the query list
//! (one name per line).
//!
//! The orchestrator reloads the directory between phases, so it holds a
//! [`DirectorySource`] instead of a parsed snapshot.

use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::record::Record;

/// Somewhere a pristine, unsorted copy of the directory can be read from.
pub trait DirectorySource: Debug {
    /// Read and parse every record, in source order.
    fn load(&self) -> Result<Vec<Record>>;

    /// Path or other identifier (for logging).
    fn source_id(&self) -> String;
}

/// Directory stored in a text file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DirectorySource for FileSource {
    fn load(&self) -> Result<Vec<Record>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read directory {}", self.path.display()))?;
        parse_directory(&text).with_context(|| format!("parse directory {}", self.path.display()))
    }

    fn source_id(&self) -> String {
        self.path.display().to_string()
    }
}

/// Directory kept as raw lines in memory. Every load re-parses them.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl DirectorySource for MemorySource {
    fn load(&self) -> Result<Vec<Record>> {
        parse_lines(self.lines.iter().map(String::as_str))
    }

    fn source_id(&self) -> String {
        format!("<memory: {} lines>", self.lines.len())
    }
}

/// Parse directory text. Lines are trimmed and blank lines skipped.
pub fn parse_directory(text: &str) -> Result<Vec<Record>> {
    parse_lines(text.lines())
}

fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Vec<Record>> {
    let mut out = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = Record::parse_line(line).with_context(|| format!("line {}", i + 1))?;
        out.push(record);
    }
    Ok(out)
}

/// Parse query text: one trimmed name per non-blank line.
pub fn parse_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn read_queries(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read queries {}", path.display()))?;
    Ok(parse_queries(&text))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn directory_lines_are_trimmed_and_blanks_skipped() {
        let recs = parse_directory("  1 alice \n\n2 bob\n").unwrap();
        assert_eq!(recs, vec![Record::new("1", "alice"), Record::new("2", "bob")]);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let err = parse_directory("1 alice\nbroken\n").unwrap_err();
        assert_eq!(format!("{err:#}"), "line 2: missing key/name separator");
    }

    #[test]
    fn queries_are_trimmed() {
        assert_eq!(parse_queries(" bob \n\ndave\n"), vec!["bob", "dave"]);
    }

    #[test]
    fn memory_source_reloads_original_order() {
        let src = MemorySource::new(["1 bob", "2 alice"]);
        let mut first = src.load().unwrap();
        first.reverse();
        assert_eq!(src.load().unwrap()[0], Record::new("1", "bob"));
    }
}
