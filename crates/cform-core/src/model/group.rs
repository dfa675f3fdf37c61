#![forbid(unsafe_code)]

//! Named groups of fields, nested groups, and lists.

use super::field::FieldState;
use super::list::ListState;
use super::node::{Node, NodeMut, NodeRef};
use super::path::{FieldPath, Segment};
use super::value::ValueTree;
use crate::validation::{ErrorSet, GroupValidator, GroupValidators};

/// A group of uniquely named members, in insertion order.
///
/// Group validators read the members and write to the group's own error
/// set. Member errors are never copied up.
#[derive(Debug, Default)]
pub struct GroupState {
    entries: Vec<(String, Node)>,
    validators: GroupValidators,
    errors: ErrorSet,
}

impl GroupState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.set(name, node);
        self
    }

    #[must_use]
    pub fn with_field(self, name: impl Into<String>, field: FieldState) -> Self {
        self.with(name, field)
    }

    #[must_use]
    pub fn with_group(self, name: impl Into<String>, group: GroupState) -> Self {
        self.with(name, group)
    }

    #[must_use]
    pub fn with_list(self, name: impl Into<String>, list: ListState) -> Self {
        self.with(name, list)
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl GroupValidator + 'static) -> Self {
        self.validators.push(validator);
        self
    }

    /// Insert a member, or replace the existing member of the same name in
    /// place.
    pub fn set(&mut self, name: impl Into<String>, node: impl Into<Node>) {
        let name = name.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((name, node)),
        }
    }

    /// Insert a new member. Returns `false` and leaves the group unchanged
    /// when the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<Node>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, node.into()));
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, n)| n)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, n)| n)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldState> {
        match self.get(name)? {
            Node::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        match self.get_mut(name)? {
            Node::Field(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&GroupState> {
        match self.get(name)? {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, name: &str) -> Option<&ListState> {
        match self.get(name)? {
            Node::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Group-level errors only.
    #[must_use]
    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    #[must_use]
    pub fn validators(&self) -> &GroupValidators {
        &self.validators
    }

    /// `true` if neither this group nor anything below it has errors.
    #[must_use]
    pub fn is_tree_valid(&self) -> bool {
        self.errors.is_empty() && self.entries.iter().all(|(_, n)| n.is_tree_valid())
    }

    /// Re-run the group's own validators against the current members.
    pub fn revalidate_own(&mut self) -> &ErrorSet {
        let errors = self.validators.evaluate(self);
        self.errors = errors;
        &self.errors
    }

    /// Revalidate every member, then the group itself.
    pub fn revalidate_deep(&mut self) {
        for (_, node) in &mut self.entries {
            node.revalidate_deep();
        }
        self.revalidate_own();
    }

    pub fn mark_all_touched(&mut self) {
        for (_, node) in &mut self.entries {
            node.mark_all_touched();
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ValueTree {
        ValueTree::Group(
            self.entries
                .iter()
                .map(|(k, n)| (k.clone(), n.snapshot()))
                .collect(),
        )
    }

    /// Node at `path`, relative to this group.
    #[must_use]
    pub fn resolve(&self, path: &FieldPath) -> Option<NodeRef<'_>> {
        let mut current = NodeRef::Group(self);
        for segment in path.segments() {
            current = match (current, segment) {
                (NodeRef::Group(g), Segment::Name(name)) => g.get(name)?.as_ref(),
                (NodeRef::List(l), Segment::Index(i)) => NodeRef::Group(l.get(*i)?),
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn resolve_mut(&mut self, path: &FieldPath) -> Option<NodeMut<'_>> {
        let mut current = NodeMut::Group(self);
        for segment in path.segments() {
            current = match (current, segment) {
                (NodeMut::Group(g), Segment::Name(name)) => g.get_mut(name)?.as_mut(),
                (NodeMut::List(l), Segment::Index(i)) => NodeMut::Group(l.get_mut(*i)?),
                _ => return None,
            };
        }
        Some(current)
    }
}
