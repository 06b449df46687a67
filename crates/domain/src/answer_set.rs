use crate::DnsRecord;
use std::sync::Arc;

/// Result of a successful resolution.
///
/// Authority and additional sections are always empty: the responder only
/// ever answers with data records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    pub answers: Vec<DnsRecord>,
    pub authority: Vec<DnsRecord>,
    pub additional: Vec<DnsRecord>,
}

impl AnswerSet {
    pub fn new(answers: Vec<DnsRecord>) -> Self {
        Self {
            answers,
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Move answers owned by `queried` to `real_name`, so the client sees
    /// the name it asked for rather than the one resolved internally.
    ///
    /// Records owned by other names (the rest of a CNAME chain) keep their
    /// owner.
    pub fn renamed(self, queried: &str, real_name: &Arc<str>) -> Self {
        let queried = queried.trim_end_matches('.');
        let answers = self
            .answers
            .into_iter()
            .map(|record| {
                let owned_by_queried = record
                    .name
                    .trim_end_matches('.')
                    .eq_ignore_ascii_case(queried);
                if owned_by_queried && record.name != *real_name {
                    record.renamed(real_name)
                } else {
                    record
                }
            })
            .collect();
        Self {
            answers,
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }
}
