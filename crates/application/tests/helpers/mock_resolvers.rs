#![allow(dead_code)]

use async_trait::async_trait;
use pod_dns_application::ports::{HostResolver, UpstreamResolver};
use pod_dns_application::services::SuffixTracker;
use pod_dns_application::use_cases::{ResolutionMode, ResolveQueryUseCase, ResolverSettings};
use pod_dns_domain::{AnswerSet, DnsQuery, DnsRecord, DomainError, LoopGuard, RecordType};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);
pub const CLUSTER_TIMEOUT: Duration = Duration::from_millis(100);
pub const STRIPPED_TIMEOUT: Duration = Duration::from_millis(1000);
pub const NAMESPACE: &str = "staging";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub domain: String,
    pub record_type: RecordType,
    pub timeout: Duration,
}

/// Upstream that answers from a table and records every call.
#[derive(Clone, Default)]
pub struct MockUpstream {
    responses: Arc<Mutex<HashMap<String, Result<AnswerSet, DomainError>>>>,
    calls: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_addresses(&self, domain: &str, ips: &[&str]) {
        let answers = ips
            .iter()
            .map(|ip| DnsRecord::address(domain, ip.parse::<IpAddr>().unwrap(), 30))
            .collect();
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), Ok(AnswerSet::new(answers)));
    }

    pub fn set_answer(&self, domain: &str, answers: AnswerSet) {
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), Ok(answers));
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstream {
    async fn query(&self, query: &DnsQuery, timeout: Duration) -> Result<AnswerSet, DomainError> {
        self.calls.lock().unwrap().push(RecordedQuery {
            domain: query.domain.to_string(),
            record_type: query.record_type,
            timeout,
        });

        self.responses
            .lock()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
            .unwrap_or(Err(DomainError::QueryTimeout))
    }
}

/// Host resolver backed by a table of hostnames.
#[derive(Clone, Default)]
pub struct MockHostResolver {
    hosts: Arc<Mutex<HashMap<String, Vec<Ipv4Addr>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockHostResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_host(&self, hostname: &str, ips: &[&str]) {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.hosts.lock().unwrap().insert(hostname.to_string(), ips);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostResolver for MockHostResolver {
    async fn resolve_addresses(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.calls.lock().unwrap().push(hostname.to_string());
        self.hosts
            .lock()
            .unwrap()
            .get(hostname)
            .cloned()
            .ok_or_else(|| DomainError::Resolution("Name or service not known".to_string()))
    }
}

pub fn settings(local_names: &str) -> ResolverSettings {
    ResolverSettings {
        namespace: NAMESPACE.into(),
        loop_guard: LoopGuard::from_csv(local_names),
        default_timeout: DEFAULT_TIMEOUT,
        cluster_timeout: CLUSTER_TIMEOUT,
        stripped_retry_timeout: STRIPPED_TIMEOUT,
    }
}

pub fn tunnel_engine(cluster: &MockUpstream, fallback: &MockUpstream) -> ResolveQueryUseCase {
    tunnel_engine_with_local_names(cluster, fallback, "")
}

pub fn tunnel_engine_with_local_names(
    cluster: &MockUpstream,
    fallback: &MockUpstream,
    local_names: &str,
) -> ResolveQueryUseCase {
    ResolveQueryUseCase::new(
        Arc::new(SuffixTracker::new()),
        Arc::new(fallback.clone()),
        ResolutionMode::Tunnel {
            cluster: Arc::new(cluster.clone()),
        },
        settings(local_names),
    )
}

pub fn plain_engine(host: &MockHostResolver, fallback: &MockUpstream) -> ResolveQueryUseCase {
    ResolveQueryUseCase::new(
        Arc::new(SuffixTracker::new()),
        Arc::new(fallback.clone()),
        ResolutionMode::Plain {
            host: Arc::new(host.clone()),
        },
        settings(""),
    )
}

pub fn a_query(domain: &str) -> DnsQuery {
    DnsQuery::new(domain, RecordType::A)
}

pub fn addresses(answers: &AnswerSet) -> Vec<IpAddr> {
    answers.answers.iter().filter_map(DnsRecord::ip).collect()
}

pub fn names(answers: &AnswerSet) -> Vec<String> {
    answers
        .answers
        .iter()
        .map(|record| record.name.to_string())
        .collect()
}
