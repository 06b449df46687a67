use pod_dns_application::ports::UpstreamResolver;
use pod_dns_application::services::SuffixTracker;
use pod_dns_application::use_cases::{ResolutionMode, ResolveQueryUseCase, ResolverSettings};
use pod_dns_domain::{Config, LoopGuard};
use pod_dns_infrastructure::dns::NameserverResolver;
use pod_dns_infrastructure::system::namespace::SERVICE_ACCOUNT_NAMESPACE_PATH;
use pod_dns_infrastructure::system::{
    discover_namespace, NamespaceSources, ResolvConf, SystemHostResolver,
};
use std::sync::Arc;
use tracing::info;

/// Attempts against the cluster nameserver before falling back.
const CLUSTER_ATTEMPTS: usize = 1;

pub struct DnsServices {
    pub use_case: Arc<ResolveQueryUseCase>,
    pub namespace: String,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver_config = &config.resolver;
        let resolv_conf = ResolvConf::read(&resolver_config.resolv_conf_path)?;

        let namespace = discover_namespace(&NamespaceSources {
            configured: resolver_config.namespace.as_deref(),
            service_account_path: SERVICE_ACCOUNT_NAMESPACE_PATH,
            resolv_conf: &resolv_conf,
        })?;

        let (fallback, mode) = match resolver_config.tunnel_nameserver_addr() {
            Some(tunnel_nameserver) => {
                let tunnel_nameserver = tunnel_nameserver.map_err(anyhow::Error::msg)?;
                let cluster_nameserver = resolv_conf.first_nameserver().ok_or_else(|| {
                    anyhow::anyhow!(
                        "No nameserver in {}; cannot reach cluster DNS",
                        resolver_config.resolv_conf_path
                    )
                })?;

                info!(
                    cluster = %cluster_nameserver,
                    fallback = %tunnel_nameserver,
                    "Tunnel mode: cluster-safe names go to cluster DNS first"
                );

                let cluster: Arc<dyn UpstreamResolver> = Arc::new(NameserverResolver::new(
                    "cluster",
                    vec![cluster_nameserver],
                    CLUSTER_ATTEMPTS,
                ));
                let fallback: Arc<dyn UpstreamResolver> = Arc::new(NameserverResolver::new(
                    "fallback",
                    vec![tunnel_nameserver],
                    resolver_config.fallback_attempts,
                ));
                (fallback, ResolutionMode::Tunnel { cluster })
            }
            None => {
                info!(
                    nameservers = ?resolv_conf.nameservers,
                    "Plain mode: A queries use the system resolver"
                );

                let fallback: Arc<dyn UpstreamResolver> = Arc::new(NameserverResolver::new(
                    "fallback",
                    resolv_conf.nameservers.clone(),
                    resolver_config.fallback_attempts,
                ));
                let host = Arc::new(SystemHostResolver::new(resolver_config.native_concurrency));
                (fallback, ResolutionMode::Plain { host })
            }
        };

        let settings = ResolverSettings {
            namespace: namespace.as_str().into(),
            loop_guard: LoopGuard::new(&resolver_config.local_names),
            default_timeout: resolver_config.query_timeout(),
            cluster_timeout: resolver_config.cluster_timeout(),
            stripped_retry_timeout: resolver_config.stripped_retry_timeout(),
        };

        let use_case = Arc::new(ResolveQueryUseCase::new(
            Arc::new(SuffixTracker::new()),
            fallback,
            mode,
            settings,
        ));

        info!(namespace = %namespace, mode = use_case.mode().name(), "Resolution engine ready");

        Ok(Self {
            use_case,
            namespace,
        })
    }
}
