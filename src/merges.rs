use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ExtendError, Result};

/// Ordered lines of a BPE `merges.txt`
///
/// The first line of an exported file is a `#version` header, every other
/// line is one rule. Earlier rules have priority, so the order is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRules {
    lines: Vec<String>,
}

impl MergeRules {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ExtendError::io(path, e))?;
        Ok(Self::from_text(&text))
    }

    /// All lines of `first`, then all lines of `second` minus its header
    ///
    /// The first line of `second` is dropped without looking at it. A
    /// `second` with a single line contributes nothing.
    pub fn concat(first: &MergeRules, second: &MergeRules) -> MergeRules {
        let lines = first
            .lines
            .iter()
            .chain(second.lines.iter().skip(1))
            .cloned()
            .collect();
        MergeRules { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ExtendError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        for line in self.lines() {
            writeln!(writer, "{line}").map_err(|e| ExtendError::io(path, e))?;
        }
        writer.flush().map_err(|e| ExtendError::io(path, e))
    }
}
