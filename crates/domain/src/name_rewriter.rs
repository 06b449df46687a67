//! Kubernetes short-name completion.
//!
//! Mirrors what a resolver inside the pod does with its `search` list, but
//! specialized to the `service.namespace.svc.cluster.local` convention.

use crate::dns_query::split_labels;
use std::borrow::Cow;

pub const CLUSTER_DOMAIN: &str = "cluster.local";

const LOCAL_TLD: &str = ".local";

fn ends_with_local(name: &str) -> bool {
    name.len() >= LOCAL_TLD.len()
        && name
            .get(name.len() - LOCAL_TLD.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(LOCAL_TLD))
}

/// Complete `name` into a fully-qualified cluster name.
///
/// - `service` becomes `service.<namespace>.svc.cluster.local`
/// - `service.namespace` becomes `service.namespace.svc.cluster.local`
/// - `anything.svc` becomes `anything.svc.cluster.local`
/// - names ending in `.local`, and every other shape, are returned as is
pub fn complete_kubernetes_name<'a>(name: &'a str, namespace: &str) -> Cow<'a, str> {
    let trimmed = name.trim_end_matches('.');
    if trimmed.is_empty() || ends_with_local(trimmed) {
        return Cow::Borrowed(trimmed);
    }

    let mut labels = split_labels(trimmed);
    if labels.len() == 1 {
        labels.push(namespace);
    }

    if labels.len() == 2 {
        Cow::Owned(format!("{}.svc.{}", labels.join("."), CLUSTER_DOMAIN))
    } else if labels
        .last()
        .is_some_and(|last| last.eq_ignore_ascii_case("svc"))
    {
        Cow::Owned(format!("{}.{}", trimmed, CLUSTER_DOMAIN))
    } else {
        Cow::Borrowed(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_suffix_is_case_insensitive() {
        assert_eq!(complete_kubernetes_name("nas.LOCAL", "default"), "nas.LOCAL");
    }

    #[test]
    fn test_trailing_dot_is_dropped() {
        assert_eq!(
            complete_kubernetes_name("foo.bar.", "default"),
            "foo.bar.svc.cluster.local"
        );
    }
}
