//! Document-wide numbering and cross-reference state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running counters for sections, theorems and equations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Section
    pub s1: u32,
    /// Subsection
    pub s2: u32,
    /// Subsubsection
    pub s3: u32,
    /// Theorem-like environments
    pub tno: u32,
    /// Equations
    pub eqno: u32,
}

impl Counters {
    /// Number an item within the current section: `"{s1}.{n}"`, or `"{n}"`
    /// before the first section.
    pub fn within_section(&self, n: u32) -> String {
        if self.s1 > 0 {
            format!("{}.{}", self.s1, n)
        } else {
            n.to_string()
        }
    }
}

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub name: String,
    pub label: String,
    pub level: u32,
}

/// Immutable snapshot of numbering, cross-references, metadata and contents.
///
/// Each accumulation step consumes a state and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatexState {
    pub counters: Counters,
    /// Label -> rendered number, e.g. `"2.3"`
    pub cross_references: BTreeMap<String, String>,
    /// Title, author, date, email, revision, ...
    pub dictionary: BTreeMap<String, String>,
    pub table_of_contents: Vec<TocEntry>,
}

impl LatexState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cross_reference(&self, label: &str) -> Option<&str> {
        self.cross_references.get(label).map(String::as_str)
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.dictionary.get(key).map(String::as_str)
    }
}
