//! Display trees derived from member records.
//!
//! Both builders are pure and total: they never fail, whatever the input,
//! and ids that do not resolve to a member render as empty names.

use std::collections::{HashMap, HashSet};

use kindred_foundation::{Gender, MemberId};
use kindred_storage::MemberRecord;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Name of the synthetic root node.
pub const DISPLAY_TREE_TITLE: &str = "Family Tree";

/// A node in a display tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TreeNode {
    /// Label shown for the node.
    pub name: String,
    /// Member details. Absent on the synthetic root.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub attributes: Option<MemberAttributes>,
    /// Child nodes.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a root node with the standard title.
    #[must_use]
    pub fn root(children: Vec<TreeNode>) -> Self {
        Self {
            name: DISPLAY_TREE_TITLE.to_string(),
            attributes: None,
            children,
        }
    }

    /// Counts this node and all of its descendants.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }

    /// Returns the number of levels below and including this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

// Lineage chains can be arbitrarily long, so nodes are torn down from a
// work list instead of through nested drops.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Member details shown on a tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MemberAttributes {
    /// Age in years.
    #[cfg_attr(feature = "serde", serde(rename = "Age"))]
    pub age: u32,
    /// Recorded gender.
    #[cfg_attr(feature = "serde", serde(rename = "Gender"))]
    pub gender: Gender,
    /// Spouse's name, or empty.
    #[cfg_attr(feature = "serde", serde(rename = "Spouse Name"))]
    pub spouse_name: String,
    /// Parent's name, or empty.
    #[cfg_attr(feature = "serde", serde(rename = "Parent Name"))]
    pub parent_name: String,
}

/// Resolves ids to names within one slice of records.
struct Names<'a> {
    by_id: HashMap<MemberId, &'a MemberRecord>,
}

impl<'a> Names<'a> {
    fn new(members: &'a [MemberRecord]) -> Self {
        Self {
            by_id: members.iter().map(|m| (m.id, m)).collect(),
        }
    }

    fn get(&self, id: MemberId) -> Option<&'a MemberRecord> {
        self.by_id.get(&id).copied()
    }

    fn name_of(&self, id: Option<MemberId>) -> String {
        id.and_then(|id| self.get(id))
            .map(|m| m.name.clone())
            .unwrap_or_default()
    }

    fn leaf(&self, member: &MemberRecord) -> TreeNode {
        TreeNode {
            name: member.name.clone(),
            attributes: Some(MemberAttributes {
                age: member.age,
                gender: member.gender,
                spouse_name: self.name_of(member.spouse_id),
                parent_name: self.name_of(member.parent_id),
            }),
            children: Vec::new(),
        }
    }
}

/// Builds the flat display tree: a titled root with one child per member,
/// in input order.
///
/// Generations are not nested; see [`build_lineage_tree`] for that.
#[must_use]
pub fn build_display_tree(members: &[MemberRecord]) -> TreeNode {
    let names = Names::new(members);
    let tree = TreeNode::root(members.iter().map(|m| names.leaf(m)).collect());
    trace!(members = members.len(), "built display tree");
    tree
}

/// Builds the lineage tree: members without a resolvable parent hang off
/// the root, and each node's children follow its `children_ids`.
///
/// Every member appears exactly once. Members caught in a parent cycle,
/// and so unreachable from any root, start a branch of their own.
#[must_use]
pub fn build_lineage_tree(members: &[MemberRecord]) -> TreeNode {
    let names = Names::new(members);
    let mut visited = HashSet::new();

    // Pre-order list of nodes, each with the slot of its parent node.
    let mut flat: Vec<(Option<usize>, TreeNode)> = Vec::with_capacity(members.len());

    let is_root = |m: &&MemberRecord| m.parent_id.and_then(|p| names.get(p)).is_none();
    for start in members.iter().filter(is_root).chain(members) {
        if !visited.insert(start.id) {
            continue;
        }
        let mut pending = vec![(None, start)];
        while let Some((parent, member)) = pending.pop() {
            let slot = flat.len();
            flat.push((parent, names.leaf(member)));
            for child_id in member.children_ids.iter().rev() {
                if let Some(child) = names.get(*child_id) {
                    if visited.insert(child.id) {
                        pending.push((Some(slot), child));
                    }
                }
            }
        }
    }

    // Children always sit after their parent, so folding from the back
    // attaches every subtree once it is complete.
    let mut roots = Vec::new();
    while let Some((parent, mut node)) = flat.pop() {
        node.children.reverse();
        match parent {
            Some(slot) => flat[slot].1.children.push(node),
            None => roots.push(node),
        }
    }
    roots.reverse();

    let tree = TreeNode::root(roots);
    trace!(members = members.len(), depth = tree.depth(), "built lineage tree");
    tree
}
