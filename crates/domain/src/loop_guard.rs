/// Decides whether a name can be sent to the cluster nameserver.
///
/// When a tunnel captures DNS traffic on the client side, any name the
/// cluster nameserver forwards upstream comes straight back to this
/// responder. Only names that look cluster-internal are sent to the cluster
/// nameserver; everything else goes to the fallback resolver.
#[derive(Debug, Clone, Default)]
pub struct LoopGuard {
    local_names: Vec<String>,
}

impl LoopGuard {
    pub fn new<I, S>(local_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let local_names = local_names
            .into_iter()
            .map(|name| name.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { local_names }
    }

    /// Build from a comma-separated list, e.g. `"corp.internal,db"`.
    pub fn from_csv(local_names: &str) -> Self {
        Self::new(local_names.split(','))
    }

    pub fn local_names(&self) -> &[String] {
        &self.local_names
    }

    pub fn is_cluster_safe(&self, name: &str) -> bool {
        let name = name.trim_end_matches('.').to_ascii_lowercase();

        name.matches('.').count() <= 1
            || name.ends_with(".local")
            // Whole label only: `x.svc-east.corp` is not a service name.
            || name.split('.').skip(1).any(|label| label == "svc")
            || self.local_names.iter().any(|local| {
                name == *local
                    || (name.len() > local.len()
                        && name.ends_with(local.as_str())
                        && name.as_bytes()[name.len() - local.len() - 1] == b'.')
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_entries_are_ignored() {
        let guard = LoopGuard::from_csv(" , db.internal ,");
        assert_eq!(guard.local_names(), ["db.internal".to_string()]);
    }

    #[test]
    fn test_local_name_requires_label_boundary() {
        let guard = LoopGuard::from_csv("corp.internal");
        assert!(guard.is_cluster_safe("api.corp.internal"));
        assert!(!guard.is_cluster_safe("api.notcorp.internal"));
    }
}
