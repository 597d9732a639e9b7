//! Validation of raw member input.
//!
//! Callers hand over loosely typed fields (text as typed at a prompt or
//! read from a request). Validation checks every field, collects all
//! failures in field order, and only then produces a typed value.

use std::fmt;

use kindred_foundation::{
    AGE_MESSAGE, Error, GENDER_MESSAGE, Gender, NAME_MESSAGE, RELATION_FIELDS_MESSAGE, Result,
};

use crate::member::{MemberPatch, NewMember};

/// Field names that carry relations. Input naming them is refused.
pub const RELATION_FIELDS: [&str; 3] = ["spouseId", "parentId", "childrenIds"];

/// Unvalidated member fields as supplied by a caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberInput {
    /// Raw name.
    pub name: Option<String>,
    /// Raw age text.
    pub age: Option<String>,
    /// Raw gender text.
    pub gender: Option<String>,
    /// Relation field names the caller tried to set.
    pub relation_fields: Vec<String>,
}

impl MemberInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the age from anything printable (numbers or text).
    #[must_use]
    pub fn age(mut self, age: impl fmt::Display) -> Self {
        self.age = Some(age.to_string());
        self
    }

    /// Sets the gender.
    #[must_use]
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Sets a field by its external name.
    ///
    /// Accepts `name`, `age`, and `gender`. Relation field names are
    /// remembered so validation can refuse them.
    ///
    /// # Errors
    ///
    /// Returns a validation error for any other field name.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        match field {
            "name" => self.name = Some(value.into()),
            "age" => self.age = Some(value.into()),
            "gender" => self.gender = Some(value.into()),
            f if RELATION_FIELDS.contains(&f) => self.relation_fields.push(f.to_string()),
            other => {
                return Err(Error::validation([format!("Unknown field: {other}")]));
            }
        }
        Ok(())
    }

    /// Validates input for creation. All three scalar fields are required.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every failed rule.
    pub fn into_new_member(self) -> Result<NewMember> {
        let mut messages = Vec::new();

        let name = check_name(self.name.as_deref(), &mut messages);
        let age = check_age(self.age.as_deref(), &mut messages);
        let gender = check_gender(self.gender.as_deref(), &mut messages);
        if !self.relation_fields.is_empty() {
            messages.push(RELATION_FIELDS_MESSAGE.to_string());
        }

        match (name, age, gender) {
            (Some(name), Some(age), Some(gender)) if messages.is_empty() => {
                Ok(NewMember::new(name, age, gender))
            }
            _ => Err(Error::validation(messages)),
        }
    }

    /// Validates input for a partial update. Fields are optional but must
    /// satisfy the creation rules when present.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every failed rule.
    pub fn into_patch(self) -> Result<MemberPatch> {
        let mut messages = Vec::new();

        let name = self
            .name
            .as_deref()
            .and_then(|raw| check_name(Some(raw), &mut messages));
        let age = self
            .age
            .as_deref()
            .and_then(|raw| check_age(Some(raw), &mut messages));
        let gender = self
            .gender
            .as_deref()
            .and_then(|raw| check_gender(Some(raw), &mut messages));
        if !self.relation_fields.is_empty() {
            messages.push(RELATION_FIELDS_MESSAGE.to_string());
        }

        if messages.is_empty() {
            Ok(MemberPatch { name, age, gender })
        } else {
            Err(Error::validation(messages))
        }
    }
}

fn check_name(raw: Option<&str>, messages: &mut Vec<String>) -> Option<String> {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => {
            messages.push(NAME_MESSAGE.to_string());
            None
        }
    }
}

fn check_age(raw: Option<&str>, messages: &mut Vec<String>) -> Option<u32> {
    match raw.and_then(|s| s.trim().parse::<u32>().ok()) {
        Some(age) if age >= 1 => Some(age),
        _ => {
            messages.push(AGE_MESSAGE.to_string());
            None
        }
    }
}

fn check_gender(raw: Option<&str>, messages: &mut Vec<String>) -> Option<Gender> {
    let gender = raw.and_then(Gender::parse);
    if gender.is_none() {
        messages.push(GENDER_MESSAGE.to_string());
    }
    gender
}
