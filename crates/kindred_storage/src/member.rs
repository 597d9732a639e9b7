//! Member data: the stored scalar record, creation candidates, partial
//! updates, and the joined read view.

use kindred_foundation::{Gender, MemberId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stored family member.
///
/// Only scalar attributes live here. Spouse and parent/child links are held
/// by the [`RelationIndex`](crate::RelationIndex).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Member {
    /// Stable identifier, assigned on creation.
    pub id: MemberId,
    /// Display name, never blank.
    pub name: String,
    /// Age in years, at least 1.
    pub age: u32,
    /// Recorded gender.
    pub gender: Gender,
}

impl Member {
    /// Applies a partial update, overwriting only the fields it carries.
    pub fn apply(&mut self, patch: &MemberPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
    }
}

/// A validated candidate for creation. The store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMember {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Recorded gender.
    pub gender: Gender,
}

impl NewMember {
    /// Creates a candidate. Callers holding raw input should go through
    /// [`MemberInput::into_new_member`](crate::MemberInput::into_new_member).
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32, gender: Gender) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
        }
    }

    /// Attaches an id, producing the stored form.
    #[must_use]
    pub fn with_id(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
        }
    }
}

/// A validated partial update of scalar fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberPatch {
    /// New name, if changing.
    pub name: Option<String>,
    /// New age, if changing.
    pub age: Option<u32>,
    /// New gender, if changing.
    pub gender: Option<Gender>,
}

impl MemberPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }
}

/// A member joined with its relation fields.
///
/// This is what read operations return. With the `serde` feature it
/// serializes with the field names `spouseId`, `parentId`, and `childrenIds`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MemberRecord {
    /// Stable identifier.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Recorded gender.
    pub gender: Gender,
    /// The member this one is married to.
    pub spouse_id: Option<MemberId>,
    /// This member's parent.
    pub parent_id: Option<MemberId>,
    /// Members whose parent is this one, in the order they were linked.
    pub children_ids: Vec<MemberId>,
}

impl MemberRecord {
    /// Builds a record with no relations.
    #[must_use]
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            age: member.age,
            gender: member.gender,
            spouse_id: None,
            parent_id: None,
            children_ids: Vec::new(),
        }
    }
}
