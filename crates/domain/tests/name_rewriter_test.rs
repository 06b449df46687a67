use pod_dns_domain::name_rewriter::complete_kubernetes_name;

#[test]
fn test_bare_service_gets_namespace() {
    assert_eq!(
        complete_kubernetes_name("foo", "bar"),
        "foo.bar.svc.cluster.local"
    );
}

#[test]
fn test_service_and_namespace_are_completed() {
    assert_eq!(
        complete_kubernetes_name("foo.bar", "ignored"),
        "foo.bar.svc.cluster.local"
    );
}

#[test]
fn test_svc_suffix_gets_cluster_domain() {
    assert_eq!(
        complete_kubernetes_name("foo.bar.svc", "ignored"),
        "foo.bar.svc.cluster.local"
    );
    assert_eq!(
        complete_kubernetes_name("my-cluster-kafka-0.my-cluster-kafka-brokers.kafka.svc", "x"),
        "my-cluster-kafka-0.my-cluster-kafka-brokers.kafka.svc.cluster.local"
    );
}

#[test]
fn test_local_names_pass_through() {
    assert_eq!(complete_kubernetes_name("foo.bar.local", "ns"), "foo.bar.local");
    assert_eq!(
        complete_kubernetes_name("kubernetes.default.svc.cluster.local", "ns"),
        "kubernetes.default.svc.cluster.local"
    );
}

#[test]
fn test_other_shapes_are_unchanged() {
    assert_eq!(complete_kubernetes_name("www.google.com", "ns"), "www.google.com");
}

#[test]
fn test_two_labels_win_over_svc_rule() {
    // Two labels are always read as service.namespace.
    assert_eq!(
        complete_kubernetes_name("foo.svc", "ns"),
        "foo.svc.svc.cluster.local"
    );
}
