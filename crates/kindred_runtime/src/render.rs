//! Plain-text and JSON rendering for the shell.

use std::fmt::Write as _;

use kindred_engine::TreeNode;
use kindred_foundation::{Error, ErrorKind, MemberId, Result};
use kindred_storage::MemberRecord;
use serde::Serialize;

/// Formats one member on a single line.
///
/// ```text
/// [1] John Doe, 40, male | spouse 2 | parent - | children 3, 4
/// ```
#[must_use]
pub fn member_line(member: &MemberRecord) -> String {
    let children = if member.children_ids.is_empty() {
        "-".to_string()
    } else {
        member
            .children_ids
            .iter()
            .map(MemberId::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "[{}] {}, {}, {} | spouse {} | parent {} | children {}",
        member.id,
        member.name,
        member.age,
        member.gender,
        id_or_dash(member.spouse_id),
        id_or_dash(member.parent_id),
        children,
    )
}

fn id_or_dash(id: Option<MemberId>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Formats a list of members, one per line.
#[must_use]
pub fn member_list(members: &[MemberRecord]) -> String {
    if members.is_empty() {
        return "No family members.".to_string();
    }
    members.iter().map(member_line).collect::<Vec<_>>().join("\n")
}

/// Draws a tree with box-drawing connectors.
///
/// ```text
/// Family Tree
/// ├── John Doe (40, male, spouse: Jane Doe)
/// │   └── Alice Doe (10, female, parent: John Doe)
/// └── Jane Doe (35, female, spouse: John Doe)
/// ```
#[must_use]
pub fn tree(root: &TreeNode) -> String {
    let mut out = label(root);
    let mut pending = Vec::new();
    push_children(&mut pending, root, "");

    while let Some((node, prefix, last)) = pending.pop() {
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let _ = write!(out, "\n{prefix}{branch}{}", label(node));
        push_children(&mut pending, node, &format!("{prefix}{indent}"));
    }
    out
}

/// Queues `node`'s children so the first one is popped first.
fn push_children<'a>(pending: &mut Vec<(&'a TreeNode, String, bool)>, node: &'a TreeNode, prefix: &str) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate().rev() {
        pending.push((child, prefix.to_string(), i + 1 == count));
    }
}

fn label(node: &TreeNode) -> String {
    let Some(attrs) = &node.attributes else {
        return node.name.clone();
    };
    let mut details = format!("{}, {}", attrs.age, attrs.gender);
    if !attrs.spouse_name.is_empty() {
        let _ = write!(details, ", spouse: {}", attrs.spouse_name);
    }
    if !attrs.parent_name.is_empty() {
        let _ = write!(details, ", parent: {}", attrs.parent_name);
    }
    format!("{} ({details})", node.name)
}

/// Serializes a value as pretty-printed JSON.
///
/// # Errors
///
/// Returns an internal error if serialization fails.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::new(ErrorKind::Internal(format!("JSON encoding failed: {e}"))))
}

/// Deepest tree [`json_tree`] will encode.
pub const JSON_TREE_MAX_DEPTH: usize = 128;

/// Serializes a display tree as pretty-printed JSON.
///
/// # Errors
///
/// Returns a command error if the tree is deeper than
/// [`JSON_TREE_MAX_DEPTH`], and an internal error if serialization fails.
pub fn json_tree(root: &TreeNode) -> Result<String> {
    let depth = root.depth();
    if depth > JSON_TREE_MAX_DEPTH {
        return Err(Error::new(ErrorKind::Command(format!(
            "tree is {depth} levels deep; JSON output is limited to {JSON_TREE_MAX_DEPTH}"
        ))));
    }
    json(root)
}

/// Formats an error with its location, if known.
#[must_use]
pub fn error(err: &Error) -> String {
    match &err.context {
        Some(context) => format!("Error: {err} ({context})"),
        None => format!("Error: {err}"),
    }
}
