use std::fmt;

/// A search suffix the client's resolver silently appends to bare names,
/// e.g. `corp.example` from a DHCP-provided `search corp.example` line.
///
/// Labels are stored lowercased; DNS names compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchSuffix {
    labels: Vec<String>,
}

impl SearchSuffix {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            labels: labels
                .iter()
                .map(|label| label.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// True when `name` ends with this suffix, label for label.
    pub fn is_suffix_of(&self, name: &[&str]) -> bool {
        if self.labels.is_empty() || self.labels.len() > name.len() {
            return false;
        }
        let tail = &name[name.len() - self.labels.len()..];
        tail.iter()
            .zip(&self.labels)
            .all(|(label, known)| label.eq_ignore_ascii_case(known))
    }
}

impl fmt::Display for SearchSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join("."))
    }
}

/// Known search suffixes, longest first.
///
/// Ties keep arrival order. Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct SuffixList {
    suffixes: Vec<SearchSuffix>,
}

impl SuffixList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `suffix` keeping the list sorted by decreasing label count.
    ///
    /// Returns `false` when the suffix is already known or empty.
    pub fn insert(&mut self, suffix: SearchSuffix) -> bool {
        if suffix.is_empty() || self.suffixes.contains(&suffix) {
            return false;
        }
        let position = self
            .suffixes
            .iter()
            .position(|existing| existing.len() < suffix.len())
            .unwrap_or(self.suffixes.len());
        self.suffixes.insert(position, suffix);
        true
    }

    /// Remove the longest known suffix from the end of `name`.
    ///
    /// Returns `name` unchanged when no suffix matches, or when the only
    /// match is the whole name (stripping must leave at least one label).
    pub fn strip<'n, 'a>(&self, name: &'n [&'a str]) -> &'n [&'a str] {
        self.suffixes
            .iter()
            .find(|suffix| suffix.len() < name.len() && suffix.is_suffix_of(name))
            .map(|suffix| &name[..name.len() - suffix.len()])
            .unwrap_or(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchSuffix> {
        self.suffixes.iter()
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

impl fmt::Display for SuffixList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.suffixes.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", joined.join(", "))
    }
}
