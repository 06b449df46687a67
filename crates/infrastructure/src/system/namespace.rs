//! Discovery of the namespace the pod runs in.

use super::resolv_conf::ResolvConf;
use fancy_regex::Regex;
use pod_dns_domain::DomainError;
use tracing::{debug, info};

pub const SERVICE_ACCOUNT_NAMESPACE_PATH: &str =
    "/var/run/secrets/kubernetes.io/serviceaccount/namespace";

/// `<namespace>.svc` entry in a search line, as written by the kubelet.
const SEARCH_NAMESPACE_PATTERN: &str = r"(?:^|\s)([a-z0-9]+)[.]svc(?:[.]|\s|$)";

#[derive(Debug, Clone)]
pub struct NamespaceSources<'a> {
    /// From the config file, the command line, or the environment
    pub configured: Option<&'a str>,
    pub service_account_path: &'a str,
    pub resolv_conf: &'a ResolvConf,
}

/// Determine the pod namespace; the first source that yields one wins.
pub fn discover_namespace(sources: &NamespaceSources<'_>) -> Result<String, DomainError> {
    if let Some(namespace) = sources.configured.map(str::trim).filter(|ns| !ns.is_empty()) {
        info!(namespace = %namespace, "Using configured namespace");
        return Ok(namespace.to_string());
    }

    match std::fs::read_to_string(sources.service_account_path) {
        Ok(content) if !content.trim().is_empty() => {
            let namespace = content.trim().to_string();
            info!(namespace = %namespace, "Read namespace from service account");
            return Ok(namespace);
        }
        Ok(_) => debug!(path = sources.service_account_path, "Service account namespace file is empty"),
        Err(e) => debug!(path = sources.service_account_path, error = %e, "No service account namespace"),
    }

    if let Some(namespace) = guess_from_search(sources.resolv_conf)? {
        info!(namespace = %namespace, "Guessed namespace from resolv.conf search line");
        return Ok(namespace);
    }

    Err(DomainError::Resolution(
        "Failed to determine namespace. Enable service account access with \
         `automountServiceAccountToken: true` in the Deployment, or set \
         TELEPRESENCE_CONTAINER_NAMESPACE (directly or through the Downward API)"
            .to_string(),
    ))
}

fn guess_from_search(resolv_conf: &ResolvConf) -> Result<Option<String>, DomainError> {
    let pattern = Regex::new(SEARCH_NAMESPACE_PATTERN)
        .map_err(|e| DomainError::Resolution(format!("Invalid namespace pattern: {}", e)))?;

    for line in &resolv_conf.search {
        let captures = pattern
            .captures(line)
            .map_err(|e| DomainError::Resolution(format!("Namespace pattern failed: {}", e)))?;
        if let Some(namespace) = captures.as_ref().and_then(|c| c.get(1)) {
            return Ok(Some(namespace.as_str().to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_from_kubelet_search_line() {
        let conf = ResolvConf::parse("search staging.svc.cluster.local svc.cluster.local cluster.local\n");
        assert_eq!(guess_from_search(&conf).unwrap(), Some("staging".to_string()));
    }

    #[test]
    fn test_guess_needs_namespace_label() {
        let conf = ResolvConf::parse("search svc.cluster.local corp.example\n");
        assert_eq!(guess_from_search(&conf).unwrap(), None);
    }
}
