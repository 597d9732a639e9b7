//! Family state and the guarded operations over it.
//!
//! A `Family` pairs the member store with the relation index and is the only
//! place relations are created or torn down. Every operation checks all of
//! its preconditions before writing anything, so a failed call leaves the
//! family exactly as it was.

use kindred_foundation::{Error, Gender, MemberId, ROSTER_ORDER_MESSAGE, Relation, Result};
use kindred_storage::{Member, MemberInput, MemberRecord, MemberStore, NewMember, RelationIndex};
use tracing::{debug, info};

use crate::tree::{self, TreeNode};

/// Outcome of a successful delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deleted {
    /// Confirmation message.
    pub message: String,
    /// The member as it was just before removal, relations included.
    pub member: MemberRecord,
}

/// A raw member record with explicit id and relation pointers.
///
/// Used to seed a family from existing data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    /// Id to store the member under.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Recorded gender.
    pub gender: Gender,
    /// Spouse pointer. The spouse's entry must point back.
    pub spouse_id: Option<MemberId>,
    /// Parent pointer.
    pub parent_id: Option<MemberId>,
}

impl RosterEntry {
    /// Creates an entry with no relations.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, age: u32, gender: Gender) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.into(),
            age,
            gender,
            spouse_id: None,
            parent_id: None,
        }
    }

    /// Sets the spouse pointer.
    #[must_use]
    pub fn spouse(mut self, id: u64) -> Self {
        self.spouse_id = Some(MemberId::new(id));
        self
    }

    /// Sets the parent pointer.
    #[must_use]
    pub fn parent(mut self, id: u64) -> Self {
        self.parent_id = Some(MemberId::new(id));
        self
    }
}

/// Members and the relations between them.
///
/// Clone is cheap: both halves are persistent maps with structural sharing,
/// so a clone is a consistent snapshot.
#[derive(Clone, Debug, Default)]
pub struct Family {
    members: MemberStore,
    relations: RelationIndex,
}

impl Family {
    /// Creates an empty family.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a family from roster entries.
    ///
    /// Scalar fields go through creation validation. Ids must be positive
    /// and ascending, so listing order stays the order members were added.
    /// Spouse pointers must be mutual, and every relation pointer must name
    /// another member in the roster.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad scalar fields, id 0, or a
    /// descending id, `IdConflict` for a repeated id, and
    /// `InvalidRelationship` for a relation pointer that cannot be honoured.
    pub fn from_roster(entries: impl IntoIterator<Item = RosterEntry>) -> Result<Self> {
        let entries: Vec<RosterEntry> = entries.into_iter().collect();
        let mut family = Self::new();

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 && entry.id < entries[i - 1].id {
                return Err(Error::validation([ROSTER_ORDER_MESSAGE]));
            }
            let candidate = MemberInput::new()
                .name(entry.name.as_str())
                .age(entry.age)
                .gender(entry.gender.as_str())
                .into_new_member()?;
            family.members.insert_with_id(candidate.with_id(entry.id))?;
        }

        for entry in &entries {
            if let Some(spouse) = entry.spouse_id {
                let mutual = entries
                    .iter()
                    .any(|other| other.id == spouse && other.spouse_id == Some(entry.id));
                if spouse == entry.id || !mutual {
                    return Err(reject(Relation::Spouse, "roster spouse pointer is not mutual", entry.id, spouse));
                }
                if family.relations.spouse_of(entry.id).is_none() {
                    family.relations.link_spouses(entry.id, spouse);
                }
            }
        }

        for entry in &entries {
            if let Some(parent) = entry.parent_id {
                if parent == entry.id || !family.members.contains(parent) {
                    return Err(reject(Relation::Child, "roster parent pointer does not resolve", parent, entry.id));
                }
                family.relations.set_parent(entry.id, parent);
            }
        }

        info!(members = family.len(), "loaded family roster");
        Ok(family)
    }

    /// The demonstration family: John and Jane Doe, married, with John's
    /// children Alice and Bob.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the roster is fixed and valid.
    pub fn sample() -> Result<Self> {
        Self::from_roster([
            RosterEntry::new(1, "John Doe", 40, Gender::Male).spouse(2),
            RosterEntry::new(2, "Jane Doe", 35, Gender::Female).spouse(1),
            RosterEntry::new(3, "Alice Doe", 10, Gender::Female).parent(1),
            RosterEntry::new(4, "Bob Doe", 8, Gender::Male).parent(1),
        ])
    }

    // --- Reads ---

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns every member in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<MemberRecord> {
        self.members.list().map(|m| self.record(m)).collect()
    }

    /// Returns one member.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if the id is unknown.
    pub fn get(&self, id: MemberId) -> Result<MemberRecord> {
        self.members.get(id).map(|m| self.record(m))
    }

    /// Returns members whose name contains `term`, ignoring case.
    ///
    /// An empty term matches everyone.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<MemberRecord> {
        let needle = term.trim().to_lowercase();
        self.members
            .list()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .map(|m| self.record(m))
            .collect()
    }

    fn record(&self, member: &Member) -> MemberRecord {
        MemberRecord {
            spouse_id: self.relations.spouse_of(member.id),
            parent_id: self.relations.parent_of(member.id),
            children_ids: self.relations.children_of(member.id).collect(),
            ..MemberRecord::from_member(member)
        }
    }

    // --- Member lifecycle ---

    /// Validates raw input and stores a new member.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every failed rule.
    pub fn create(&mut self, input: MemberInput) -> Result<MemberRecord> {
        let candidate = input.into_new_member()?;
        self.add(candidate)
    }

    /// Stores an already validated member.
    ///
    /// # Errors
    ///
    /// Returns `IdConflict` only if the store's id allocation is corrupted.
    pub fn add(&mut self, candidate: NewMember) -> Result<MemberRecord> {
        let member = self.members.create(candidate)?;
        info!(member = %member.id, name = %member.name, "created family member");
        Ok(self.record(&member))
    }

    /// Updates scalar fields of a member.
    ///
    /// Relation fields cannot be changed here; use the relation operations.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad or relation fields, then
    /// `MemberNotFound` if the id is unknown.
    pub fn update(&mut self, id: MemberId, input: MemberInput) -> Result<MemberRecord> {
        let patch = input.into_patch()?;
        let member = self.members.update(id, &patch)?;
        info!(member = %id, "updated family member");
        Ok(self.record(&member))
    }

    /// Removes a member and clears every relation that pointed at it.
    ///
    /// A spouse becomes unmarried and children lose their parent. Descendants
    /// are never removed.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if the id is unknown.
    pub fn delete(&mut self, id: MemberId) -> Result<Deleted> {
        let before = self.get(id)?;
        self.members.delete(id)?;
        let detached = self.relations.detach(id);

        info!(
            member = %id,
            spouse_cleared = detached.spouse.is_some(),
            orphaned = detached.orphaned.len(),
            "deleted family member"
        );
        Ok(Deleted {
            message: format!("Family member with ID {id} deleted successfully"),
            member: before,
        })
    }

    // --- Relations ---

    /// Marries two members and returns the first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Spouse)` if either id is unknown, the ids
    /// are equal, or either member already has a spouse.
    pub fn marry(&mut self, a: MemberId, b: MemberId) -> Result<MemberRecord> {
        if !self.members.contains(a) || !self.members.contains(b) {
            return Err(reject(Relation::Spouse, "unknown member", a, b));
        }
        if a == b {
            return Err(reject(Relation::Spouse, "cannot marry oneself", a, b));
        }
        if self.relations.spouse_of(a).is_some() || self.relations.spouse_of(b).is_some() {
            return Err(reject(Relation::Spouse, "already married", a, b));
        }

        self.relations.link_spouses(a, b);
        info!(member = %a, spouse = %b, "linked spouses");
        self.get(a)
    }

    /// Ends a member's marriage and returns the member.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Spouse)` if the id is unknown or the
    /// member is not married.
    pub fn divorce(&mut self, id: MemberId) -> Result<MemberRecord> {
        if !self.members.contains(id) {
            return Err(reject(Relation::Spouse, "unknown member", id, id));
        }
        let Some(spouse) = self.relations.unlink_spouse(id) else {
            return Err(reject(Relation::Spouse, "not married", id, id));
        };

        info!(member = %id, former_spouse = %spouse, "unlinked spouses");
        self.get(id)
    }

    /// Makes `child` a child of `parent` and returns the parent.
    ///
    /// A child that already has a different parent is moved; the old
    /// parent's children lose it in the same step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Child)` if either id is unknown, the ids
    /// are equal, or the link already exists.
    pub fn add_child(&mut self, parent: MemberId, child: MemberId) -> Result<MemberRecord> {
        if !self.members.contains(parent) || !self.members.contains(child) {
            return Err(reject(Relation::Child, "unknown member", parent, child));
        }
        if parent == child {
            return Err(reject(Relation::Child, "cannot parent oneself", parent, child));
        }
        if self.relations.is_parent(parent, child) {
            return Err(reject(Relation::Child, "already linked", parent, child));
        }

        match self.relations.set_parent(child, parent) {
            Some(previous) => {
                info!(parent = %parent, child = %child, previous = %previous, "moved child to new parent");
            }
            None => info!(parent = %parent, child = %child, "linked child"),
        }
        self.get(parent)
    }

    /// Removes a member's parent link and returns the member.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRelationship(Child)` if the id is unknown or the
    /// member has no parent.
    pub fn remove_parent(&mut self, child: MemberId) -> Result<MemberRecord> {
        if !self.members.contains(child) {
            return Err(reject(Relation::Child, "unknown member", child, child));
        }
        let Some(parent) = self.relations.clear_parent(child) else {
            return Err(reject(Relation::Child, "no parent to remove", child, child));
        };

        info!(parent = %parent, child = %child, "unlinked child");
        self.get(child)
    }

    // --- Derived views ---

    /// Builds the flat display tree of every member.
    #[must_use]
    pub fn display_tree(&self) -> TreeNode {
        tree::build_display_tree(&self.list())
    }

    /// Builds the recursive lineage tree.
    #[must_use]
    pub fn lineage_tree(&self) -> TreeNode {
        tree::build_lineage_tree(&self.list())
    }

    /// Verifies the relation invariants: symmetric spouses, a child index
    /// that mirrors the parent edges, no self-relations, and no pointer to a
    /// member that does not exist.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let resolved = self.members.ids().all(|id| {
            let spouse_ok = self
                .relations
                .spouse_of(id)
                .is_none_or(|s| self.members.contains(s));
            let parent_ok = self
                .relations
                .parent_of(id)
                .is_none_or(|p| self.members.contains(p));
            let children_ok = self
                .relations
                .children_of(id)
                .all(|c| self.members.contains(c));
            spouse_ok && parent_ok && children_ok
        });
        resolved && self.relations.is_consistent()
    }
}

/// Logs the precise reason a relation was refused and returns the generic
/// error callers see.
fn reject(relation: Relation, reason: &str, a: MemberId, b: MemberId) -> Error {
    debug!(%relation, %a, %b, reason, "rejected relationship");
    Error::invalid_relationship(relation)
}
