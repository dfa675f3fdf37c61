#![forbid(unsafe_code)]

//! Repeated groups, in display order.

use super::group::GroupState;
use super::value::ValueTree;

#[derive(Debug, Default)]
pub struct ListState {
    items: Vec<GroupState>,
}

impl ListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_groups(items: Vec<GroupState>) -> Self {
        Self { items }
    }

    /// Append a group and return its index.
    pub fn push(&mut self, group: GroupState) -> usize {
        self.items.push(group);
        self.items.len() - 1
    }

    /// Replace every entry, dropping the old ones with their interaction
    /// state.
    pub fn replace(&mut self, items: Vec<GroupState>) {
        self.items = items;
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GroupState> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut GroupState> {
        self.items.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupState> {
        self.items.iter()
    }

    #[must_use]
    pub fn is_tree_valid(&self) -> bool {
        self.items.iter().all(GroupState::is_tree_valid)
    }

    pub fn revalidate_deep(&mut self) {
        for item in &mut self.items {
            item.revalidate_deep();
        }
    }

    pub fn mark_all_touched(&mut self) {
        for item in &mut self.items {
            item.mark_all_touched();
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ValueTree {
        ValueTree::List(self.items.iter().map(GroupState::snapshot).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldState;

    fn address(city: &str) -> GroupState {
        GroupState::new().with_field("city", FieldState::new(city))
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut list = ListState::new();
        assert_eq!(list.push(address("A")), 0);
        assert_eq!(list.push(address("B")), 1);
        let cities: Vec<String> = list
            .iter()
            .map(|g| g.field("city").unwrap().value().to_string())
            .collect();
        assert_eq!(cities, vec!["A", "B"]);
    }

    #[test]
    fn replace_discards_previous_entries() {
        let mut list = ListState::from_groups(vec![address("A"), address("B")]);
        list.replace(vec![address("C")]);
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.snapshot(),
            ValueTree::list([ValueTree::group([("city", ValueTree::value("C"))])])
        );
    }
}
