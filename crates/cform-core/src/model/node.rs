#![forbid(unsafe_code)]

//! Tree nodes and borrowed views into them.

use super::field::FieldState;
use super::group::GroupState;
use super::list::ListState;
use super::value::ValueTree;

/// A member of a group.
#[derive(Debug)]
pub enum Node {
    Field(FieldState),
    Group(GroupState),
    List(ListState),
}

impl Node {
    #[must_use]
    pub fn as_ref(&self) -> NodeRef<'_> {
        match self {
            Self::Field(f) => NodeRef::Field(f),
            Self::Group(g) => NodeRef::Group(g),
            Self::List(l) => NodeRef::List(l),
        }
    }

    pub fn as_mut(&mut self) -> NodeMut<'_> {
        match self {
            Self::Field(f) => NodeMut::Field(f),
            Self::Group(g) => NodeMut::Group(g),
            Self::List(l) => NodeMut::List(l),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ValueTree {
        self.as_ref().snapshot()
    }

    #[must_use]
    pub fn is_tree_valid(&self) -> bool {
        self.as_ref().is_tree_valid()
    }

    pub fn revalidate_deep(&mut self) {
        self.as_mut().revalidate_deep();
    }

    pub fn mark_all_touched(&mut self) {
        self.as_mut().mark_all_touched();
    }
}

impl From<FieldState> for Node {
    fn from(field: FieldState) -> Self {
        Self::Field(field)
    }
}

impl From<GroupState> for Node {
    fn from(group: GroupState) -> Self {
        Self::Group(group)
    }
}

impl From<ListState> for Node {
    fn from(list: ListState) -> Self {
        Self::List(list)
    }
}

/// Shared view of any node, including list items (which are groups that
/// are not wrapped in a `Node`).
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Field(&'a FieldState),
    Group(&'a GroupState),
    List(&'a ListState),
}

impl NodeRef<'_> {
    #[must_use]
    pub fn snapshot(self) -> ValueTree {
        match self {
            Self::Field(f) => ValueTree::Value(f.value().clone()),
            Self::Group(g) => g.snapshot(),
            Self::List(l) => l.snapshot(),
        }
    }

    #[must_use]
    pub fn is_tree_valid(self) -> bool {
        match self {
            Self::Field(f) => f.is_valid(),
            Self::Group(g) => g.is_tree_valid(),
            Self::List(l) => l.is_tree_valid(),
        }
    }

    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            Self::Field(_) => "field",
            Self::Group(_) => "group",
            Self::List(_) => "list",
        }
    }
}

/// Mutable view of any node.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Field(&'a mut FieldState),
    Group(&'a mut GroupState),
    List(&'a mut ListState),
}

impl NodeMut<'_> {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Field(_) => "field",
            Self::Group(_) => "group",
            Self::List(_) => "list",
        }
    }

    /// Revalidate every field and group below and including this node,
    /// children before parents.
    pub fn revalidate_deep(self) {
        match self {
            Self::Field(f) => {
                f.revalidate();
            }
            Self::Group(g) => g.revalidate_deep(),
            Self::List(l) => l.revalidate_deep(),
        }
    }

    pub fn mark_all_touched(self) {
        match self {
            Self::Field(f) => f.mark_touched(),
            Self::Group(g) => g.mark_all_touched(),
            Self::List(l) => l.mark_all_touched(),
        }
    }
}
