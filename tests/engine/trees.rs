//! Integration tests for tree derivation
//!
//! Tests the flat display tree and the lineage tree built from live
//! families.

use kindred_engine::{DISPLAY_TREE_TITLE, Family, TreeNode, build_display_tree};
use kindred_foundation::MemberId;
use kindred_storage::MemberInput;

fn names(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

// =============================================================================
// Display Tree
// =============================================================================

#[test]
fn empty_family_has_only_the_root() {
    let tree = Family::new().display_tree();
    assert_eq!(tree.name, DISPLAY_TREE_TITLE);
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn display_tree_follows_list_order() {
    let family = Family::sample().unwrap();
    let tree = family.display_tree();
    assert_eq!(names(&tree.children), ["John Doe", "Jane Doe", "Alice Doe", "Bob Doe"]);
}

#[test]
fn display_tree_reflects_deletion() {
    let mut family = Family::sample().unwrap();
    family.delete(MemberId::new(2)).unwrap();

    let tree = family.display_tree();
    let john = tree.children[0].attributes.as_ref().unwrap();
    assert_eq!(john.spouse_name, "");
    assert_eq!(tree.children.len(), 3);
}

#[test]
fn display_tree_matches_free_function() {
    let family = Family::sample().unwrap();
    assert_eq!(family.display_tree(), build_display_tree(&family.list()));
}

// =============================================================================
// Lineage Tree
// =============================================================================

#[test]
fn lineage_nests_three_generations() {
    let mut family = Family::sample().unwrap();
    let baby = family
        .create(MemberInput::new().name("Baby Doe").age(1).gender("female"))
        .unwrap()
        .id;
    family.add_child(MemberId::new(3), baby).unwrap();

    let tree = family.lineage_tree();
    assert_eq!(tree.depth(), 4);
    let alice = &tree.children[0].children[0];
    assert_eq!(alice.name, "Alice Doe");
    assert_eq!(names(&alice.children), ["Baby Doe"]);
    let attrs = alice.children[0].attributes.as_ref().unwrap();
    assert_eq!(attrs.parent_name, "Alice Doe");
}

#[test]
fn lineage_contains_every_member_once() {
    let mut family = Family::sample().unwrap();
    family.remove_parent(MemberId::new(4)).unwrap();

    let tree = family.lineage_tree();
    assert_eq!(tree.node_count(), family.len() + 1);
    assert_eq!(names(&tree.children), ["John Doe", "Jane Doe", "Bob Doe"]);
}

#[test]
fn lineage_of_cyclic_edges_still_lists_everyone() {
    // Parent cycles are not forbidden by the relation rules.
    let mut family = Family::new();
    for name in ["A", "B"] {
        family
            .create(MemberInput::new().name(name).age(30).gender("male"))
            .unwrap();
    }
    family.add_child(MemberId::new(1), MemberId::new(2)).unwrap();
    family.add_child(MemberId::new(2), MemberId::new(1)).unwrap();

    let tree = family.lineage_tree();
    assert_eq!(tree.node_count(), 3);
}

#[test]
fn lineage_of_a_long_parent_chain() {
    let len: u64 = 100_000;
    let mut family = Family::new();
    for i in 1..=len {
        family
            .create(MemberInput::new().name(format!("Gen {i}")).age(30).gender("female"))
            .unwrap();
        if i > 1 {
            family.add_child(MemberId::new(i - 1), MemberId::new(i)).unwrap();
        }
    }

    let tree = family.lineage_tree();
    assert_eq!(tree.depth(), 100_001);
    assert_eq!(tree.node_count(), 100_001);
    assert_eq!(tree.children[0].name, "Gen 1");
}
