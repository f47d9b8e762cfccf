use intake_reconcile::compute_identity;

#[test]
fn matches_md5_of_concatenation() {
    let id = compute_identity(Some("Jane"), Some("Doe"), Some("1990-05-01"), Some("INS1"));
    assert_eq!(id.as_str(), "065608ad34cd17120dce6028fe4f9092");
}

#[test]
fn deterministic() {
    let a = compute_identity(Some("Jane"), Some("Doe"), Some("1990-05-01"), Some("INS1"));
    let b = compute_identity(Some("Jane"), Some("Doe"), Some("1990-05-01"), Some("INS1"));
    assert_eq!(a, b);
}

#[test]
fn absent_parts_are_empty_strings() {
    let only_first = compute_identity(Some("Jane"), None, None, None);
    let empty_rest = compute_identity(Some("Jane"), Some(""), Some(""), Some(""));
    assert_eq!(only_first, empty_rest);
    assert_eq!(only_first.as_str(), "2b95993380f8be6bd4bd46bf44f98db9");
}

#[test]
fn each_input_changes_the_id() {
    let base = compute_identity(Some("Jane"), Some("Doe"), Some("1990-05-01"), Some("INS1"));
    let variants = [
        compute_identity(Some("Jan"), Some("Doe"), Some("1990-05-01"), Some("INS1")),
        compute_identity(Some("Jane"), Some("Do"), Some("1990-05-01"), Some("INS1")),
        compute_identity(Some("Jane"), Some("Doe"), Some("1990-05-02"), Some("INS1")),
        compute_identity(Some("Jane"), Some("Doe"), Some("1990-05-01"), Some("INS2")),
    ];
    for variant in &variants {
        assert_ne!(*variant, base);
    }
    assert_eq!(variants[3].as_str(), "fc9ffb4b98e0cfa3ac8a2e0beb7bc441");
}

#[test]
fn no_separator_between_parts() {
    // Shifting characters across the boundary yields the same concatenation.
    let a = compute_identity(Some("Jan"), Some("eDoe"), None, None);
    let b = compute_identity(Some("Jane"), Some("Doe"), None, None);
    assert_eq!(a, b);
}
