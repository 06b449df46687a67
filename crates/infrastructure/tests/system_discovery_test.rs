use pod_dns_domain::DomainError;
use pod_dns_infrastructure::system::{discover_namespace, NamespaceSources, ResolvConf};
use std::io::Write;
use tempfile::NamedTempFile;

const KUBELET_RESOLV_CONF: &str = "\
search staging.svc.cluster.local svc.cluster.local cluster.local corp.example
nameserver 10.96.0.10
options ndots:5
";

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn path(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}

#[test]
fn test_read_resolv_conf_from_disk() {
    let file = file_with(KUBELET_RESOLV_CONF);

    let conf = ResolvConf::read(path(&file)).unwrap();

    assert_eq!(conf.first_nameserver(), Some("10.96.0.10:53".parse().unwrap()));
    assert_eq!(conf.search.len(), 1);
}

#[test]
fn test_missing_resolv_conf_is_io_error() {
    let result = ResolvConf::read("/nonexistent/resolv.conf");
    assert!(matches!(result, Err(DomainError::IoError(_))));
}

#[test]
fn test_configured_namespace_wins() {
    let service_account = file_with("production\n");
    let conf = ResolvConf::parse(KUBELET_RESOLV_CONF);

    let namespace = discover_namespace(&NamespaceSources {
        configured: Some("dev"),
        service_account_path: path(&service_account),
        resolv_conf: &conf,
    })
    .unwrap();

    assert_eq!(namespace, "dev");
}

#[test]
fn test_service_account_is_trimmed() {
    let service_account = file_with("production\n");
    let conf = ResolvConf::parse(KUBELET_RESOLV_CONF);

    let namespace = discover_namespace(&NamespaceSources {
        configured: None,
        service_account_path: path(&service_account),
        resolv_conf: &conf,
    })
    .unwrap();

    assert_eq!(namespace, "production");
}

#[test]
fn test_guess_from_search_line() {
    let conf = ResolvConf::parse(KUBELET_RESOLV_CONF);

    let namespace = discover_namespace(&NamespaceSources {
        configured: Some("  "),
        service_account_path: "/nonexistent/namespace",
        resolv_conf: &conf,
    })
    .unwrap();

    assert_eq!(namespace, "staging");
}

#[test]
fn test_undiscoverable_namespace_explains_fix() {
    let conf = ResolvConf::parse("search corp.example\nnameserver 10.0.0.2\n");

    let result = discover_namespace(&NamespaceSources {
        configured: None,
        service_account_path: "/nonexistent/namespace",
        resolv_conf: &conf,
    });

    match result {
        Err(DomainError::Resolution(message)) => {
            assert!(message.contains("TELEPRESENCE_CONTAINER_NAMESPACE"));
            assert!(message.contains("automountServiceAccountToken"));
        }
        other => panic!("expected resolution error, got {:?}", other),
    }
}
