//! Class catalog: the ordered set of currently valid class names per subject.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::enrollment::Subject;

/// One currently active class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCatalogEntry {
    pub class_name: String,
    pub subject: Subject,
}

impl ClassCatalogEntry {
    pub fn new(subject: Subject, class_name: impl Into<String>) -> Self {
        Self { class_name: class_name.into(), subject }
    }
}

/// Ordered catalog of valid class names.
///
/// Catalog order is part of the contract: suggestion lists follow it. Empty
/// names are dropped and a repeated name keeps its first position within its
/// subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCatalog {
    names_by_subject: HashMap<Subject, Vec<String>>,
}

impl ClassCatalog {
    pub fn new(entries: impl IntoIterator<Item = ClassCatalogEntry>) -> Self {
        let mut names_by_subject: HashMap<Subject, Vec<String>> = HashMap::new();
        let mut seen: HashSet<(Subject, String)> = HashSet::new();

        for entry in entries {
            if entry.class_name.is_empty() {
                continue;
            }
            if seen.insert((entry.subject, entry.class_name.clone())) {
                names_by_subject.entry(entry.subject).or_default().push(entry.class_name);
            }
        }

        Self { names_by_subject }
    }

    /// Names for `subject` in catalog order.
    pub fn names_for(&self, subject: Subject) -> &[String] {
        self.names_by_subject.get(&subject).map_or(&[][..], Vec::as_slice)
    }

    /// Exact, case- and whitespace-sensitive membership.
    pub fn contains(&self, subject: Subject, class_name: &str) -> bool {
        self.names_for(subject).iter().any(|name| name == class_name)
    }

    pub fn len(&self) -> usize {
        self.names_by_subject.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<ClassCatalogEntry> for ClassCatalog {
    fn from_iter<T: IntoIterator<Item = ClassCatalogEntry>>(iter: T) -> Self {
        Self::new(iter)
    }
}
