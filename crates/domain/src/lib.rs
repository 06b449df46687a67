//! pod-dns Domain Layer
pub mod answer_set;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod loop_guard;
pub mod name_rewriter;
pub mod probe;
pub mod search_suffix;

pub use answer_set::AnswerSet;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use errors::DomainError;
pub use loop_guard::LoopGuard;
pub use search_suffix::{SearchSuffix, SuffixList};
