//! A shareable, lock-guarded family handle.
//!
//! `Family` itself is a plain value. Hosts that serve several callers at
//! once wrap it in a `SharedFamily`: one lock guards the whole family, so
//! id allocation and each relation operation's check-then-write sequence run
//! without interleaving. Reads and tree derivation see a consistent state.

use std::sync::Arc;

use kindred_foundation::{MemberId, Result};
use kindred_storage::{MemberInput, MemberRecord};
use parking_lot::RwLock;

use crate::family::{Deleted, Family};
use crate::tree::TreeNode;

/// Cloneable handle to one family shared between callers.
#[derive(Clone, Debug, Default)]
pub struct SharedFamily {
    inner: Arc<RwLock<Family>>,
}

impl SharedFamily {
    /// Wraps a family for sharing.
    #[must_use]
    pub fn new(family: Family) -> Self {
        Self {
            inner: Arc::new(RwLock::new(family)),
        }
    }

    /// Runs `f` with shared read access.
    pub fn read<R>(&self, f: impl FnOnce(&Family) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Runs `f` with exclusive write access.
    ///
    /// Use this to group several operations into one atomic step.
    pub fn write<R>(&self, f: impl FnOnce(&mut Family) -> R) -> R {
        f(&mut *self.inner.write())
    }

    /// Returns a point-in-time copy of the family.
    #[must_use]
    pub fn snapshot(&self) -> Family {
        self.inner.read().clone()
    }

    /// See [`Family::list`].
    #[must_use]
    pub fn list(&self) -> Vec<MemberRecord> {
        self.read(Family::list)
    }

    /// See [`Family::get`].
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if the id is unknown.
    pub fn get(&self, id: MemberId) -> Result<MemberRecord> {
        self.read(|family| family.get(id))
    }

    /// See [`Family::create`].
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every failed rule.
    pub fn create(&self, input: MemberInput) -> Result<MemberRecord> {
        self.write(|family| family.create(input))
    }

    /// See [`Family::update`].
    ///
    /// # Errors
    ///
    /// Returns a validation error or `MemberNotFound`.
    pub fn update(&self, id: MemberId, input: MemberInput) -> Result<MemberRecord> {
        self.write(|family| family.update(id, input))
    }

    /// See [`Family::delete`].
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if the id is unknown.
    pub fn delete(&self, id: MemberId) -> Result<Deleted> {
        self.write(|family| family.delete(id))
    }

    /// See [`Family::marry`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Spouse)` if a precondition fails.
    pub fn marry(&self, a: MemberId, b: MemberId) -> Result<MemberRecord> {
        self.write(|family| family.marry(a, b))
    }

    /// See [`Family::add_child`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Child)` if a precondition fails.
    pub fn add_child(&self, parent: MemberId, child: MemberId) -> Result<MemberRecord> {
        self.write(|family| family.add_child(parent, child))
    }

    /// See [`Family::divorce`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Spouse)` if a precondition fails.
    pub fn divorce(&self, id: MemberId) -> Result<MemberRecord> {
        self.write(|family| family.divorce(id))
    }

    /// See [`Family::remove_parent`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Child)` if a precondition fails.
    pub fn remove_parent(&self, child: MemberId) -> Result<MemberRecord> {
        self.write(|family| family.remove_parent(child))
    }

    /// Builds the flat display tree from one consistent state.
    #[must_use]
    pub fn display_tree(&self) -> TreeNode {
        self.read(Family::display_tree)
    }

    /// Builds the lineage tree from one consistent state.
    #[must_use]
    pub fn lineage_tree(&self) -> TreeNode {
        self.read(Family::lineage_tree)
    }
}
