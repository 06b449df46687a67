use crate::ports::{HostResolver, UpstreamResolver};
use crate::services::SuffixTracker;
use futures::future::{BoxFuture, FutureExt};
use pod_dns_domain::name_rewriter::complete_kubernetes_name;
use pod_dns_domain::probe::{self, PROBE_ANSWER};
use pod_dns_domain::{AnswerSet, DnsQuery, DnsRecord, DomainError, LoopGuard, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How A queries that survive the earlier passes get answered.
pub enum ResolutionMode {
    /// A tunnel on the client side captures DNS traffic. Cluster-safe names
    /// go to the cluster nameserver first; everything else to the fallback.
    Tunnel { cluster: Arc<dyn UpstreamResolver> },
    /// No tunnel: the machine's own resolver answers A queries.
    Plain { host: Arc<dyn HostResolver> },
}

impl ResolutionMode {
    pub fn name(&self) -> &'static str {
        match self {
            ResolutionMode::Tunnel { .. } => "tunnel",
            ResolutionMode::Plain { .. } => "plain",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub namespace: Arc<str>,
    pub loop_guard: LoopGuard,
    /// Per-attempt timeout when the caller gives none
    pub default_timeout: Duration,
    pub cluster_timeout: Duration,
    pub stripped_retry_timeout: Duration,
}

/// One resolution in flight: the name being resolved, the name the client
/// asked for, and whether a suffix was already stripped.
#[derive(Debug, Clone)]
struct Attempt {
    query: DnsQuery,
    real_name: Arc<str>,
    timeout: Duration,
    stripped: bool,
}

/// Passes tried before type dispatch, in order.
#[derive(Debug, Clone, Copy)]
enum Pass {
    SanityCheck,
    SuffixProbe,
    SuffixStrip,
}

const PASSES: [Pass; 3] = [Pass::SanityCheck, Pass::SuffixProbe, Pass::SuffixStrip];

enum PassOutcome {
    NoMatch,
    Answered(Result<AnswerSet, DomainError>),
    Delegated(Delegation),
}

enum Delegation {
    /// Resolve the name again without its search suffix.
    Stripped { stem: String },
    Cluster {
        cluster: Arc<dyn UpstreamResolver>,
        completed: String,
    },
    Fallback,
    Native { host: Arc<dyn HostResolver> },
    /// AAAA re-dispatched as A.
    AsA,
}

/// Resolves queries arriving at the pod.
///
/// Each query runs through a fixed chain of passes; the first pass that
/// matches either answers it or delegates it to an upstream. Queries no
/// pass claims are dispatched on their record type.
pub struct ResolveQueryUseCase {
    suffixes: Arc<SuffixTracker>,
    fallback: Arc<dyn UpstreamResolver>,
    mode: ResolutionMode,
    settings: ResolverSettings,
}

impl ResolveQueryUseCase {
    pub fn new(
        suffixes: Arc<SuffixTracker>,
        fallback: Arc<dyn UpstreamResolver>,
        mode: ResolutionMode,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            suffixes,
            fallback,
            mode,
            settings,
        }
    }

    pub fn mode(&self) -> &ResolutionMode {
        &self.mode
    }

    pub fn suffixes(&self) -> &Arc<SuffixTracker> {
        &self.suffixes
    }

    /// Resolve `query`. Answers for the name sent upstream come back under
    /// the queried name.
    ///
    /// `timeout` bounds each upstream attempt; the configured default is
    /// used when it is `None`.
    pub async fn execute(
        &self,
        query: &DnsQuery,
        timeout: Option<Duration>,
    ) -> Result<AnswerSet, DomainError> {
        let attempt = Attempt {
            query: query.clone(),
            real_name: Arc::clone(&query.domain),
            timeout: timeout.unwrap_or(self.settings.default_timeout),
            stripped: false,
        };
        self.resolve(attempt).await
    }

    fn resolve(&self, attempt: Attempt) -> BoxFuture<'_, Result<AnswerSet, DomainError>> {
        async move {
            for pass in PASSES {
                match self.evaluate(pass, &attempt).await {
                    PassOutcome::NoMatch => continue,
                    PassOutcome::Answered(result) => return result,
                    PassOutcome::Delegated(delegation) => {
                        return self.delegate(delegation, attempt).await
                    }
                }
            }
            let delegation = self.dispatch(&attempt);
            self.delegate(delegation, attempt).await
        }
        .boxed()
    }

    async fn evaluate(&self, pass: Pass, attempt: &Attempt) -> PassOutcome {
        let labels = attempt.query.labels();
        match pass {
            Pass::SanityCheck => {
                if !probe::is_sanity_check(&attempt.real_name) {
                    return PassOutcome::NoMatch;
                }
                debug!(real_name = %attempt.real_name, "Sanity check");
                PassOutcome::Answered(Err(DomainError::Authoritative(format!(
                    "sanity check {}",
                    attempt.real_name
                ))))
            }
            Pass::SuffixProbe => {
                if !probe::is_probe(&labels) {
                    return PassOutcome::NoMatch;
                }
                self.suffixes.consider(&labels).await;
                let record = DnsRecord::address(
                    Arc::clone(&attempt.real_name),
                    IpAddr::V4(PROBE_ANSWER),
                    0,
                );
                PassOutcome::Answered(Ok(AnswerSet::new(vec![record])))
            }
            Pass::SuffixStrip => {
                if attempt.stripped {
                    return PassOutcome::NoMatch;
                }
                let stem = self.suffixes.strip(&labels).await;
                if stem.len() == labels.len() {
                    return PassOutcome::NoMatch;
                }
                PassOutcome::Delegated(Delegation::Stripped {
                    stem: stem.join("."),
                })
            }
        }
    }

    fn dispatch(&self, attempt: &Attempt) -> Delegation {
        match attempt.query.record_type {
            RecordType::A => match &self.mode {
                ResolutionMode::Tunnel { cluster } => {
                    let name = attempt.query.domain.as_ref();
                    if !self.settings.loop_guard.is_cluster_safe(name) {
                        return Delegation::Fallback;
                    }
                    Delegation::Cluster {
                        cluster: Arc::clone(cluster),
                        completed: complete_kubernetes_name(name, &self.settings.namespace)
                            .into_owned(),
                    }
                }
                ResolutionMode::Plain { host } => Delegation::Native {
                    host: Arc::clone(host),
                },
            },
            RecordType::AAAA => Delegation::AsA,
            _ => Delegation::Fallback,
        }
    }

    async fn delegate(
        &self,
        delegation: Delegation,
        attempt: Attempt,
    ) -> Result<AnswerSet, DomainError> {
        match delegation {
            Delegation::Stripped { stem } => {
                debug!(
                    domain = %attempt.query.domain,
                    stem = %stem,
                    record_type = %attempt.query.record_type,
                    "Stripped search suffix"
                );
                let retry = Attempt {
                    query: attempt.query.with_domain(stem.as_str()),
                    real_name: Arc::clone(&attempt.real_name),
                    timeout: self.settings.stripped_retry_timeout,
                    stripped: true,
                };
                match self.resolve(retry).await {
                    Ok(answers) => Ok(answers),
                    Err(e) => {
                        debug!(
                            stem = %stem,
                            domain = %attempt.query.domain,
                            error = %e,
                            "Stripped lookup failed, asking fallback"
                        );
                        self.ask_fallback(&attempt).await
                    }
                }
            }
            Delegation::Cluster { cluster, completed } => {
                debug!(domain = %attempt.query.domain, completed = %completed, "Asking cluster DNS");
                let cluster_query = attempt.query.with_domain(completed.as_str());
                match cluster
                    .query(&cluster_query, self.settings.cluster_timeout)
                    .await
                {
                    Ok(answers) => Ok(answers.renamed(&completed, &attempt.real_name)),
                    Err(e) => {
                        warn!(
                            domain = %completed,
                            real_name = %attempt.real_name,
                            error = %e,
                            "Cluster lookup failed, asking fallback"
                        );
                        self.ask_fallback(&attempt).await
                    }
                }
            }
            Delegation::Fallback => self.ask_fallback(&attempt).await,
            Delegation::Native { host } => {
                debug!(domain = %attempt.query.domain, "Resolving through host resolver");
                let addresses = host.resolve_addresses(&attempt.query.domain).await?;
                let answers = addresses
                    .into_iter()
                    .map(|ip| DnsRecord::address(Arc::clone(&attempt.real_name), IpAddr::V4(ip), 0))
                    .collect();
                Ok(AnswerSet::new(answers))
            }
            Delegation::AsA => {
                debug!(domain = %attempt.query.domain, "Answering AAAA with A records");
                let as_a = Attempt {
                    query: attempt.query.with_record_type(RecordType::A),
                    ..attempt
                };
                self.resolve(as_a).await
            }
        }
    }

    async fn ask_fallback(&self, attempt: &Attempt) -> Result<AnswerSet, DomainError> {
        debug!(
            domain = %attempt.query.domain,
            record_type = %attempt.query.record_type,
            "Asking fallback resolver"
        );
        self.fallback
            .query(&attempt.query, attempt.timeout)
            .await
            .map(|answers| answers.renamed(&attempt.query.domain, &attempt.real_name))
    }
}
