//! Sentinel names agreed with the client side of the session.
//!
//! The client sends `hellotelepresence<random>` through its own resolver to
//! learn which search suffix gets appended, and
//! `hellotelepresence<random>.telepresence.io` to check the responder is
//! reachable.

use crate::SearchSuffix;

/// Prefix of the first label of every probe and sanity-check name.
pub const PROBE_PREFIX: &str = "hellotelepresence";

/// Domain that turns a probe name into a sanity check.
pub const SANITY_CHECK_DOMAIN: &str = "telepresence.io";

/// Address answered to suffix probes.
pub const PROBE_ANSWER: std::net::Ipv4Addr = std::net::Ipv4Addr::LOCALHOST;

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value
        .len()
        .checked_sub(suffix.len())
        .and_then(|start| value.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// Whether the real (as asked) name is a reachability check.
pub fn is_sanity_check(real_name: &str) -> bool {
    let name = real_name.trim_end_matches('.');
    starts_with_ignore_case(name, PROBE_PREFIX) && ends_with_ignore_case(name, SANITY_CHECK_DOMAIN)
}

/// Whether the first label marks a suffix probe.
pub fn is_probe(labels: &[&str]) -> bool {
    labels
        .first()
        .is_some_and(|first| starts_with_ignore_case(first, PROBE_PREFIX))
}

/// The suffix carried by a probe name, or `None` when `labels` is not a probe.
///
/// A probe with no trailing labels yields an empty suffix: the client
/// resolver appended nothing.
pub fn probe_suffix(labels: &[&str]) -> Option<SearchSuffix> {
    if !is_probe(labels) {
        return None;
    }
    Some(SearchSuffix::new(&labels[1..]))
}
