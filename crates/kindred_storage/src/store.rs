//! Member storage with monotonic id allocation.
//!
//! The `MemberStore` owns every member's scalar data. It knows nothing about
//! relations; the engine keeps those in a [`RelationIndex`](crate::RelationIndex)
//! alongside it.

use im::OrdMap;
use kindred_foundation::{Error, ID_MESSAGE, MemberId, Result};

use crate::member::{Member, MemberPatch, NewMember};

/// Stores members keyed by id.
///
/// Backed by a persistent ordered map, so cloning is cheap and iteration
/// is in id order. Ids are allocated monotonically, which makes id order
/// the same as creation order.
#[derive(Clone, Debug, Default)]
pub struct MemberStore {
    /// Members by id.
    members: OrdMap<MemberId, Member>,
    /// Highest id ever allocated or inserted, live or not.
    high_water: Option<MemberId>,
}

impl MemberStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id the next `create` will assign.
    ///
    /// This is one past the largest id currently stored, or 1 for an empty
    /// store, unless a larger id was handed out earlier and has since been
    /// deleted. Ids are never handed out twice.
    ///
    /// # Errors
    ///
    /// Returns `IdConflict` naming the largest id once `u64::MAX` has been
    /// used, since no id is left after it.
    pub fn next_id(&self) -> Result<MemberId> {
        let max_live = self.members.get_max().map(|(id, _)| *id);
        match max_live.max(self.high_water) {
            None => Ok(MemberId::FIRST),
            Some(max) => max.next().ok_or_else(|| Error::id_conflict(max)),
        }
    }

    /// Iterates over all members in id order.
    pub fn list(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.values()
    }

    /// Iterates over all ids in order.
    pub fn ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.keys().copied()
    }

    /// Gets a member by id.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if no member has this id.
    pub fn get(&self, id: MemberId) -> Result<&Member> {
        self.members
            .get(&id)
            .ok_or_else(|| Error::member_not_found(id))
    }

    /// Checks whether a member with this id exists.
    #[must_use]
    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    /// Stores a new member under the next id and returns it.
    ///
    /// # Errors
    ///
    /// Returns `IdConflict` if ids are exhausted or the allocated id is
    /// already present. The latter indicates corrupted state.
    pub fn create(&mut self, candidate: NewMember) -> Result<Member> {
        let id = self.next_id()?;
        if self.members.contains_key(&id) {
            return Err(Error::id_conflict(id));
        }

        let member = candidate.with_id(id);
        self.members.insert(id, member.clone());
        self.high_water = Some(id);
        Ok(member)
    }

    /// Stores a member that already carries an id.
    ///
    /// Used to seed a store from an existing roster.
    ///
    /// # Errors
    ///
    /// Returns a validation error for id 0, and `IdConflict` if the id is
    /// already taken.
    pub fn insert_with_id(&mut self, member: Member) -> Result<()> {
        let id = member.id;
        if !id.is_valid() {
            return Err(Error::validation([ID_MESSAGE]));
        }
        if self.members.contains_key(&id) {
            return Err(Error::id_conflict(id));
        }
        self.members.insert(id, member);
        self.high_water = self.high_water.max(Some(id));
        Ok(())
    }

    /// Applies a partial update and returns the updated member.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if no member has this id.
    pub fn update(&mut self, id: MemberId, patch: &MemberPatch) -> Result<Member> {
        let member = self
            .members
            .get_mut(&id)
            .ok_or_else(|| Error::member_not_found(id))?;
        member.apply(patch);
        Ok(member.clone())
    }

    /// Removes a member and returns it.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if no member has this id.
    pub fn delete(&mut self, id: MemberId) -> Result<Member> {
        self.members
            .remove(&id)
            .ok_or_else(|| Error::member_not_found(id))
    }

    /// Returns the number of stored members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
