//! Integration tests for family operations
//!
//! Tests the relation rules end to end through the public `Family` API.

use kindred_engine::{Family, RosterEntry};
use kindred_foundation::{ErrorKind, Gender, MemberId, Relation};
use kindred_storage::MemberInput;

fn id(raw: u64) -> MemberId {
    MemberId::new(raw)
}

fn person(name: &str, age: u32, gender: &str) -> MemberInput {
    MemberInput::new().name(name).age(age).gender(gender)
}

fn relation_error(kind: &ErrorKind) -> Option<Relation> {
    match kind {
        ErrorKind::InvalidRelationship(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// Sample Family
// =============================================================================

#[test]
fn sample_family_matches_the_does() {
    let family = Family::sample().unwrap();
    let names: Vec<_> = family.list().into_iter().map(|m| m.name).collect();
    assert_eq!(names, ["John Doe", "Jane Doe", "Alice Doe", "Bob Doe"]);

    let bob = family.get(id(4)).unwrap();
    assert_eq!(bob.age, 8);
    assert_eq!(bob.gender, Gender::Male);
    assert_eq!(bob.parent_id, Some(id(1)));
}

// =============================================================================
// Marriage
// =============================================================================

#[test]
fn marriage_is_monogamous() {
    let mut family = Family::new();
    let a = family.create(person("A", 30, "male")).unwrap().id;
    let b = family.create(person("B", 30, "female")).unwrap().id;
    let c = family.create(person("C", 30, "female")).unwrap().id;

    family.marry(a, b).unwrap();
    let err = family.marry(c, a).unwrap_err();
    assert_eq!(relation_error(&err.kind), Some(Relation::Spouse));
    assert_eq!(family.get(c).unwrap().spouse_id, None);
}

#[test]
fn divorce_then_remarry() {
    let mut family = Family::sample().unwrap();
    let carol = family.create(person("Carol", 38, "female")).unwrap().id;

    family.divorce(id(2)).unwrap();
    let john = family.marry(id(1), carol).unwrap();

    assert_eq!(john.spouse_id, Some(carol));
    assert_eq!(family.get(id(2)).unwrap().spouse_id, None);
    assert!(family.is_consistent());
}

// =============================================================================
// Parents and Children
// =============================================================================

#[test]
fn add_child_returns_parent_with_child_listed_last() {
    let mut family = Family::sample().unwrap();
    let sam = family.create(person("Sam", 1, "male")).unwrap().id;

    let john = family.add_child(id(1), sam).unwrap();
    assert_eq!(john.children_ids, vec![id(3), id(4), sam]);
}

#[test]
fn repeated_add_child_fails_without_side_effects() {
    let mut family = Family::sample().unwrap();
    let before = family.list();

    let err = family.add_child(id(1), id(4)).unwrap_err();
    assert_eq!(relation_error(&err.kind), Some(Relation::Child));
    assert_eq!(family.list(), before);
}

#[test]
fn grandchildren_form_a_chain() {
    let mut family = Family::sample().unwrap();
    let baby = family.create(person("Baby", 1, "female")).unwrap().id;
    family.add_child(id(3), baby).unwrap();

    assert_eq!(family.get(baby).unwrap().parent_id, Some(id(3)));
    assert_eq!(family.get(id(3)).unwrap().parent_id, Some(id(1)));
}

// =============================================================================
// Deletion
// =============================================================================

#[test]
fn deleting_a_parent_keeps_the_children() {
    let mut family = Family::sample().unwrap();
    family.delete(id(1)).unwrap();

    let ids: Vec<_> = family.list().into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![id(2), id(3), id(4)]);
    assert!(family.list().iter().all(|m| m.parent_id.is_none() && m.spouse_id.is_none()));
}

#[test]
fn deleting_unknown_is_not_found() {
    let mut family = Family::sample().unwrap();
    let err = family.delete(id(9)).unwrap_err();
    assert_eq!(err.to_string(), "Family member with ID 9 not found");
    assert_eq!(family.len(), 4);
}

// =============================================================================
// Rosters
// =============================================================================

#[test]
fn roster_ids_are_kept_and_allocation_continues_after_them() {
    let mut family = Family::from_roster([
        RosterEntry::new(7, "Gran", 80, Gender::Female),
        RosterEntry::new(9, "Mum", 50, Gender::Female).parent(7),
    ])
    .unwrap();

    assert_eq!(family.get(id(7)).unwrap().children_ids, vec![id(9)]);
    let next = family.create(person("Kid", 20, "male")).unwrap();
    assert_eq!(next.id, id(10));
}

#[test]
fn roster_lists_in_roster_order() {
    let family = Family::from_roster([
        RosterEntry::new(2, "B", 30, Gender::Male),
        RosterEntry::new(5, "E", 30, Gender::Male),
        RosterEntry::new(8, "H", 30, Gender::Male),
    ])
    .unwrap();
    let names: Vec<_> = family.list().into_iter().map(|m| m.name).collect();
    assert_eq!(names, ["B", "E", "H"]);

    let err = Family::from_roster([
        RosterEntry::new(3, "C", 30, Gender::Male),
        RosterEntry::new(1, "A", 30, Gender::Male),
    ])
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(_)));
}

#[test]
fn roster_validates_scalar_fields() {
    let err = Family::from_roster([RosterEntry::new(1, "  ", 0, Gender::Male)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(ref m) if m.len() == 2));
}
