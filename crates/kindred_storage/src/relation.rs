//! Relation storage with a derived child index.
//!
//! Spouse links are stored symmetrically: both directions are written and
//! removed together. Parent/child links are a single edge set keyed by
//! child; the per-parent child list is a secondary index over those edges,
//! updated in the same step, so the two directions cannot disagree.

use im::{HashMap, Vector};
use kindred_foundation::MemberId;

/// Stores spouse pairs and parent edges between members.
///
/// The index performs no existence or policy checks. Callers decide
/// whether a link is allowed; the index only keeps both directions in step.
#[derive(Clone, Debug, Default)]
pub struct RelationIndex {
    /// Spouse links, always present in both directions.
    spouses: HashMap<MemberId, MemberId>,
    /// Parent edges: child -> parent.
    parents: HashMap<MemberId, MemberId>,
    /// Derived index: parent -> children, in link order.
    children: HashMap<MemberId, Vector<MemberId>>,
}

/// Edges removed when a member is detached from the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Detached {
    /// Former spouse, now unmarried.
    pub spouse: Option<MemberId>,
    /// Former parent, which lost this child.
    pub parent: Option<MemberId>,
    /// Former children, now without a parent.
    pub orphaned: Vec<MemberId>,
}

impl Detached {
    /// Returns true if nothing was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spouse.is_none() && self.parent.is_none() && self.orphaned.is_empty()
    }
}

impl RelationIndex {
    /// Creates a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the spouse of a member.
    #[must_use]
    pub fn spouse_of(&self, id: MemberId) -> Option<MemberId> {
        self.spouses.get(&id).copied()
    }

    /// Returns the parent of a member.
    #[must_use]
    pub fn parent_of(&self, id: MemberId) -> Option<MemberId> {
        self.parents.get(&id).copied()
    }

    /// Iterates over a member's children in the order they were linked.
    pub fn children_of(&self, id: MemberId) -> impl Iterator<Item = MemberId> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flat_map(|kids| kids.iter().copied())
    }

    /// Checks whether `child`'s parent is `parent`.
    #[must_use]
    pub fn is_parent(&self, parent: MemberId, child: MemberId) -> bool {
        self.parent_of(child) == Some(parent)
    }

    /// Links two members as spouses, replacing nothing.
    ///
    /// Callers must ensure both are currently unmarried; otherwise the
    /// previous partners are left pointing at members who moved on.
    pub fn link_spouses(&mut self, a: MemberId, b: MemberId) {
        self.spouses.insert(a, b);
        self.spouses.insert(b, a);
    }

    /// Dissolves a member's marriage, returning the former spouse.
    ///
    /// Unlinking an unmarried member is a no-op.
    pub fn unlink_spouse(&mut self, id: MemberId) -> Option<MemberId> {
        let spouse = self.spouses.remove(&id)?;
        if self.spouses.get(&spouse) == Some(&id) {
            self.spouses.remove(&spouse);
        }
        Some(spouse)
    }

    /// Sets a member's parent, returning the previous parent if it changed.
    ///
    /// The previous parent's child list loses the member in the same step.
    /// Setting the current parent again is a no-op.
    pub fn set_parent(&mut self, child: MemberId, parent: MemberId) -> Option<MemberId> {
        if self.is_parent(parent, child) {
            return None;
        }

        let previous = self.clear_parent(child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push_back(child);
        previous
    }

    /// Removes a member's parent edge, returning the former parent.
    pub fn clear_parent(&mut self, child: MemberId) -> Option<MemberId> {
        let parent = self.parents.remove(&child)?;
        self.remove_from_children(parent, child);
        Some(parent)
    }

    fn remove_from_children(&mut self, parent: MemberId, child: MemberId) {
        let now_empty = match self.children.get_mut(&parent) {
            Some(kids) => {
                if let Some(pos) = kids.index_of(&child) {
                    kids.remove(pos);
                }
                kids.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.children.remove(&parent);
        }
    }

    /// Removes every edge that mentions `id`.
    ///
    /// The member's spouse becomes unmarried, its parent loses it as a
    /// child, and its children lose their parent. Nothing else changes.
    pub fn detach(&mut self, id: MemberId) -> Detached {
        let spouse = self.unlink_spouse(id);
        let parent = self.clear_parent(id);

        let orphaned: Vec<_> = self
            .children
            .remove(&id)
            .map(|kids| kids.into_iter().collect())
            .unwrap_or_default();
        for child in &orphaned {
            self.parents.remove(child);
        }

        Detached {
            spouse,
            parent,
            orphaned,
        }
    }

    /// Returns the number of marriages.
    #[must_use]
    pub fn marriage_count(&self) -> usize {
        self.spouses.len() / 2
    }

    /// Returns the number of parent edges.
    #[must_use]
    pub fn parent_edge_count(&self) -> usize {
        self.parents.len()
    }

    /// Verifies that spouse links are symmetric, self-free, and that the
    /// child index mirrors the parent edges exactly.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let spouses_ok = self
            .spouses
            .iter()
            .all(|(a, b)| a != b && self.spouses.get(b) == Some(a));

        let parents_ok = self.parents.iter().all(|(child, parent)| {
            child != parent && self.children_of(*parent).filter(|c| c == child).count() == 1
        });

        let index_size: usize = self.children.values().map(Vector::len).sum();
        let children_ok = index_size == self.parents.len()
            && self
                .children
                .iter()
                .all(|(parent, kids)| !kids.is_empty() && kids.iter().all(|c| self.is_parent(*parent, *c)));

        spouses_ok && parents_ok && children_ok
    }
}
