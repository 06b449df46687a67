use pod_dns_domain::probe::probe_suffix;
use pod_dns_domain::SuffixList;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Search suffixes learned from probe queries.
///
/// Shared by every in-flight query; all insertions go through the write lock
/// so racing probes keep the list ordered.
#[derive(Debug, Default)]
pub struct SuffixTracker {
    suffixes: RwLock<SuffixList>,
}

impl SuffixTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the suffix carried by a probe name.
    ///
    /// Returns `true` only when a new suffix was stored. Non-probe names and
    /// probes without a suffix are ignored.
    pub async fn consider(&self, labels: &[&str]) -> bool {
        let Some(suffix) = probe_suffix(labels) else {
            return false;
        };
        if suffix.is_empty() {
            debug!("Probe carried no search suffix");
            return false;
        }

        let mut suffixes = self.suffixes.write().await;
        let learned = suffix.to_string();
        if !suffixes.insert(suffix) {
            return false;
        }
        info!(suffix = %learned, known = %suffixes.to_string(), "Learned search suffix");
        true
    }

    /// Remove the longest known suffix from `labels`.
    pub async fn strip(&self, labels: &[&str]) -> Vec<String> {
        let suffixes = self.suffixes.read().await;
        suffixes
            .strip(labels)
            .iter()
            .map(|label| label.to_string())
            .collect()
    }

    pub async fn snapshot(&self) -> SuffixList {
        self.suffixes.read().await.clone()
    }
}
