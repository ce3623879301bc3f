// Domain module tests.

use super::*;
use proptest::prelude::*;

#[test]
fn test_extract_zone_generic() {
    assert_eq!(extract_zone("example.com"), "com");
}

#[test]
fn test_extract_zone_second_level() {
    assert_eq!(extract_zone("example.co.uk"), "co.uk");
    assert_eq!(extract_zone("shop.example.org.uk"), "org.uk");
    assert_eq!(extract_zone("example.com.au"), "com.au");
}

#[test]
fn test_extract_zone_deep_name_uses_last_label() {
    assert_eq!(extract_zone("a.b.c.io"), "io");
}

#[test]
fn test_extract_zone_two_labels_never_pair() {
    // "co.uk" itself has only two labels, so the heuristic does not apply
    assert_eq!(extract_zone("co.uk"), "uk");
}

#[test]
fn test_extract_zone_single_label() {
    assert_eq!(extract_zone("com"), "com");
}

#[test]
fn test_normalize_domain_lowercases_and_trims() {
    assert_eq!(normalize_domain("  Example.COM \n").unwrap(), "example.com");
}

#[test]
fn test_normalize_domain_strips_root_dot() {
    assert_eq!(normalize_domain("example.com.").unwrap(), "example.com");
}

#[test]
fn test_normalize_domain_rejects_empty() {
    assert!(matches!(
        normalize_domain("   "),
        Err(WhoisError::InvalidDomain(_))
    ));
    assert!(matches!(
        normalize_domain("."),
        Err(WhoisError::InvalidDomain(_))
    ));
}

#[test]
fn test_normalize_domain_rejects_inner_whitespace() {
    assert!(normalize_domain("exa mple.com").is_err());
}

#[test]
fn test_normalize_domain_rejects_empty_label() {
    assert!(normalize_domain("example..com").is_err());
    assert!(normalize_domain(".example.com").is_err());
}

#[test]
fn test_normalize_domain_rejects_overlong() {
    let long = format!("{}.com", "a".repeat(260));
    assert!(normalize_domain(&long).is_err());
}

proptest! {
    #[test]
    fn prop_zone_is_suffix_of_domain(labels in proptest::collection::vec("[a-z0-9]{1,10}", 1..6)) {
        let domain = labels.join(".");
        let zone = extract_zone(&domain);
        prop_assert!(domain.ends_with(&zone));
        let zone_labels = zone.split('.').count();
        prop_assert!(zone_labels == 1 || zone_labels == 2);
    }

    #[test]
    fn prop_normalized_domain_is_stable(labels in proptest::collection::vec("[A-Za-z0-9-]{1,12}", 1..5)) {
        let domain = labels.join(".");
        let once = normalize_domain(&domain).unwrap();
        prop_assert_eq!(normalize_domain(&once).unwrap(), once.clone());
        prop_assert_eq!(once.clone(), once.to_lowercase());
    }
}
