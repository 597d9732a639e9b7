//! Integration tests for identifiers and enumerations
//!
//! Tests id parsing and ordering, gender parsing, and relation names.

use kindred_foundation::{ErrorKind, Gender, MemberId, Relation};

// =============================================================================
// MemberId
// =============================================================================

#[test]
fn member_ids_start_at_one_and_count_up() {
    let first = MemberId::FIRST;
    assert_eq!(first.get(), 1);
    assert_eq!(first.next().and_then(MemberId::next), Some(MemberId::new(3)));
    assert_eq!(MemberId::new(u64::MAX).next(), None);
}

#[test]
fn member_id_displays_bare_number() {
    assert_eq!(MemberId::new(42).to_string(), "42");
    assert_eq!(format!("{:?}", MemberId::new(42)), "MemberId(42)");
}

#[test]
fn member_id_parses_from_text() {
    assert_eq!(" 7 ".parse::<MemberId>().unwrap(), MemberId::new(7));
}

#[test]
fn member_id_rejects_zero_and_garbage() {
    for bad in ["0", "-3", "abc", "", "1.5"] {
        let err = bad.parse::<MemberId>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Command(_)), "{bad:?} parsed");
    }
}

#[test]
fn member_ids_sort_numerically() {
    let mut ids = vec![MemberId::new(10), MemberId::new(2), MemberId::new(1)];
    ids.sort();
    assert_eq!(ids, vec![MemberId::new(1), MemberId::new(2), MemberId::new(10)]);
}

// =============================================================================
// Gender
// =============================================================================

#[test]
fn gender_accepts_exactly_two_values() {
    assert_eq!(Gender::parse("male"), Some(Gender::Male));
    assert_eq!(Gender::parse("female"), Some(Gender::Female));
    assert_eq!(Gender::parse("Male"), None);
    assert_eq!(Gender::parse(" female"), None);
    assert_eq!(Gender::parse("other"), None);
}

#[test]
fn gender_from_str_reports_validation_message() {
    let err = "robot".parse::<Gender>().unwrap_err();
    assert_eq!(err.to_string(), r#"Gender must be either "male" or "female""#);
}

// =============================================================================
// Relation
// =============================================================================

#[test]
fn relation_names() {
    assert_eq!(Relation::Spouse.to_string(), "spouse");
    assert_eq!(Relation::Child.to_string(), "child");
}
