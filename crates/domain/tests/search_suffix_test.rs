use pod_dns_domain::{SearchSuffix, SuffixList};

fn suffix(name: &str) -> SearchSuffix {
    let labels: Vec<&str> = name.split('.').collect();
    SearchSuffix::new(&labels)
}

fn label_counts(list: &SuffixList) -> Vec<usize> {
    list.iter().map(SearchSuffix::len).collect()
}

#[test]
fn test_insert_keeps_longest_first() {
    let mut list = SuffixList::new();

    assert!(list.insert(suffix("corp.example")));
    assert!(list.insert(suffix("a.b.corp.example")));
    assert!(list.insert(suffix("lan")));
    assert!(list.insert(suffix("eng.corp.example")));

    assert_eq!(label_counts(&list), vec![4, 3, 2, 1]);
}

#[test]
fn test_equal_lengths_keep_arrival_order() {
    let mut list = SuffixList::new();
    list.insert(suffix("first.example"));
    list.insert(suffix("second.example"));
    list.insert(suffix("x.third.example"));

    let names: Vec<String> = list.iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        vec!["x.third.example", "first.example", "second.example"]
    );
}

#[test]
fn test_duplicate_insert_is_noop() {
    let mut list = SuffixList::new();
    assert!(list.insert(suffix("corp.example")));
    assert!(!list.insert(suffix("corp.example")));
    assert!(!list.insert(suffix("CORP.Example")));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_empty_suffix_is_never_stored() {
    let mut list = SuffixList::new();
    assert!(!list.insert(SearchSuffix::new::<&str>(&[])));
    assert!(list.is_empty());
}

#[test]
fn test_strip_removes_longest_match() {
    let mut list = SuffixList::new();
    list.insert(suffix("example"));
    list.insert(suffix("corp.example"));

    let name = ["service1", "corp", "example"];
    assert_eq!(list.strip(&name), &["service1"]);
}

#[test]
fn test_strip_without_match_returns_input() {
    let mut list = SuffixList::new();
    list.insert(suffix("corp.example"));

    let name = ["kubernetes", "default"];
    assert_eq!(list.strip(&name), &name);

    let stripped_once = list.strip(&name);
    assert_eq!(list.strip(stripped_once), stripped_once);
}

#[test]
fn test_strip_matches_whole_labels_only() {
    let mut list = SuffixList::new();
    list.insert(suffix("example"));

    let name = ["service1", "badexample"];
    assert_eq!(list.strip(&name), &name);
}

#[test]
fn test_strip_never_empties_the_name() {
    let mut list = SuffixList::new();
    list.insert(suffix("corp.example"));

    let name = ["corp", "example"];
    assert_eq!(list.strip(&name), &name);
}

#[test]
fn test_strip_is_case_insensitive() {
    let mut list = SuffixList::new();
    list.insert(suffix("corp.example"));

    let name = ["web", "CORP", "Example"];
    assert_eq!(list.strip(&name), &["web"]);
}
