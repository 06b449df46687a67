use super::RecordType;
use std::sync::Arc;

/// DNS question (domain + record type).
///
/// Uses `Arc<str>` so the engine can derive rewritten copies without
/// reallocating the parts it does not touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Copy of this query asking for a different name.
    pub fn with_domain(&self, domain: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            record_type: self.record_type,
        }
    }

    /// Copy of this query asking for a different record type.
    pub fn with_record_type(&self, record_type: RecordType) -> Self {
        Self {
            domain: Arc::clone(&self.domain),
            record_type,
        }
    }

    /// Name split into labels. The root name has no labels.
    pub fn labels(&self) -> Vec<&str> {
        split_labels(&self.domain)
    }
}

/// Split a presentation-format name into labels, ignoring a trailing dot.
pub fn split_labels(name: &str) -> Vec<&str> {
    let name = name.trim_end_matches('.');
    if name.is_empty() {
        return Vec::new();
    }
    name.split('.').collect()
}

/// Strip the trailing root dot from a wire-derived name.
pub fn normalize_domain(domain: &str) -> &str {
    domain.trim_end_matches('.')
}
