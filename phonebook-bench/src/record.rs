use core::fmt;

use anyhow::Context;

/// One directory entry: `<key> <name>`.
///
/// Records are only ever reordered by the sort strategies, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub name: String,
}

impl Record {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    /// Split a directory line at its first space.
    /// Everything before is the key, everything after (spaces included) is the name.
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let (key, name) = line
            .split_once(' ')
            .context("missing key/name separator")?;
        Ok(Self::new(key, name))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.name)
    }
}
