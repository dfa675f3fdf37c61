#![forbid(unsafe_code)]

//! The form model: a tree of fields with synchronous revalidation, rules,
//! and change listeners.
//!
//! # Mutation pipeline
//!
//! Every mutation runs to completion before returning:
//!
//! 1. the value changes (user edit or patch),
//! 2. the changed field and its ancestor groups are revalidated,
//! 3. rules driven by the changed field rebuild and revalidate their
//!    dependents,
//! 4. listeners subscribed to the changed field are called.
//!
//! A listener (or any later reader) therefore never sees a value without
//! its error state.
//!
//! # Example
//!
//! ```rust
//! use cform_core::form::FormModel;
//! use cform_core::model::{FieldState, GroupState};
//! use cform_core::validation::{ErrorTag, ValidatorBuilder};
//!
//! let root = GroupState::new().with_field(
//!     "firstName",
//!     FieldState::new("").with_validators(ValidatorBuilder::new().required().build()),
//! );
//! let mut form = FormModel::new(root);
//! assert!(form.errors("firstName").unwrap().contains(ErrorTag::Required));
//!
//! form.set_value("firstName", "Juan").unwrap();
//! assert!(form.is_valid());
//! ```

use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::FormError;
use crate::model::{
    FieldPath, FieldState, FormValue, GroupState, ListState, NodeMut, NodeRef, ValueTree,
};
use crate::rules::{Rule, RuleTable};
use crate::validation::{ErrorSet, Validators};

/// Callback invoked after a field's value changes.
pub type ChangeListener = Box<dyn FnMut(&FieldPath, &FormValue)>;

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Subscription {
    id: ListenerId,
    path: FieldPath,
    listener: ChangeListener,
}

pub struct FormModel {
    root: GroupState,
    rules: RuleTable,
    subscriptions: Vec<Subscription>,
    next_listener: u64,
}

impl FormModel {
    /// Take ownership of a tree and run a full validation pass.
    #[must_use]
    pub fn new(mut root: GroupState) -> Self {
        root.revalidate_deep();
        Self {
            root,
            rules: RuleTable::new(),
            subscriptions: Vec::new(),
            next_listener: 0,
        }
    }

    #[must_use]
    pub fn root(&self) -> &GroupState {
        &self.root
    }

    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn node(&self, path: &str) -> Result<NodeRef<'_>, FormError> {
        self.node_at(&FieldPath::parse(path)?)
    }

    pub fn node_at(&self, path: &FieldPath) -> Result<NodeRef<'_>, FormError> {
        self.root
            .resolve(path)
            .ok_or_else(|| FormError::UnknownPath(path.clone()))
    }

    pub fn field(&self, path: &str) -> Result<&FieldState, FormError> {
        let path = FieldPath::parse(path)?;
        match self.node_at(&path)? {
            NodeRef::Field(f) => Ok(f),
            _ => Err(FormError::NotAField(path)),
        }
    }

    pub fn group(&self, path: &str) -> Result<&GroupState, FormError> {
        let path = FieldPath::parse(path)?;
        match self.node_at(&path)? {
            NodeRef::Group(g) => Ok(g),
            _ => Err(FormError::NotAGroup(path)),
        }
    }

    pub fn list(&self, path: &str) -> Result<&ListState, FormError> {
        let path = FieldPath::parse(path)?;
        match self.node_at(&path)? {
            NodeRef::List(l) => Ok(l),
            _ => Err(FormError::NotAList(path)),
        }
    }

    pub fn value(&self, path: &str) -> Result<&FormValue, FormError> {
        self.field(path).map(FieldState::value)
    }

    /// Errors of a field, or the group-level errors of a group.
    pub fn errors(&self, path: &str) -> Result<&ErrorSet, FormError> {
        let path = FieldPath::parse(path)?;
        match self.node_at(&path)? {
            NodeRef::Field(f) => Ok(f.errors()),
            NodeRef::Group(g) => Ok(g.errors()),
            NodeRef::List(_) => Err(FormError::NotAGroup(path)),
        }
    }

    /// `true` iff no field or group anywhere in the tree has errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.root.is_tree_valid()
    }

    #[must_use]
    pub fn snapshot(&self) -> ValueTree {
        self.root.snapshot()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// User edit of a field. Marks the field dirty.
    pub fn set_value(&mut self, path: &str, value: impl Into<FormValue>) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        let value = value.into();
        debug!(path = %path, value = %value, "field edited");
        field_mut(&mut self.root, &path)?.set_value(value);
        self.propagate(vec![path]);
        Ok(())
    }

    /// Mark a field touched, or every field below a group or list.
    pub fn mark_touched(&mut self, path: &str) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        self.root
            .resolve_mut(&path)
            .ok_or(FormError::UnknownPath(path))?
            .mark_all_touched();
        Ok(())
    }

    /// Merge a partial value tree into the form and return how many fields
    /// were written.
    ///
    /// Group members match by name and list entries by index; anything that
    /// does not line up with the tree is skipped. Touched and dirty flags are
    /// not changed.
    pub fn patch(&mut self, tree: &ValueTree) -> usize {
        let mut changed = Vec::new();
        patch_group(&mut self.root, tree, &FieldPath::root(), &mut changed);
        let count = changed.len();
        debug!(fields = count, "form patched");
        self.propagate(changed);
        count
    }

    /// Add a field to an existing group.
    pub fn add_field(
        &mut self,
        group_path: &str,
        name: &str,
        initial: impl Into<FormValue>,
        validators: Validators,
    ) -> Result<(), FormError> {
        let group_path = FieldPath::parse(group_path)?;
        let group = group_mut(&mut self.root, &group_path)?;
        if !group.insert(name, FieldState::new(initial).with_validators(validators)) {
            return Err(FormError::DuplicateName {
                group: group_path,
                name: name.to_string(),
            });
        }
        let path = group_path.child(name);
        revalidate_at(&mut self.root, &path)?;
        self.apply_rules_under(&path);
        debug!(path = %path, "field added");
        Ok(())
    }

    /// Append a group to a list and return its index.
    pub fn append(&mut self, list_path: &str, group: GroupState) -> Result<usize, FormError> {
        let list_path = FieldPath::parse(list_path)?;
        let index = list_mut(&mut self.root, &list_path)?.push(group);
        let item = list_path.index(index);
        revalidate_at(&mut self.root, &item)?;
        self.apply_rules_under(&item);
        debug!(list = %list_path, index, "list entry appended");
        Ok(index)
    }

    /// Replace every entry of a list.
    pub fn replace_list(
        &mut self,
        list_path: &str,
        groups: Vec<GroupState>,
    ) -> Result<(), FormError> {
        let list_path = FieldPath::parse(list_path)?;
        let len = groups.len();
        list_mut(&mut self.root, &list_path)?.replace(groups);
        revalidate_at(&mut self.root, &list_path)?;
        self.apply_rules_under(&list_path);
        debug!(list = %list_path, len, "list replaced");
        Ok(())
    }

    /// Replace a field's validators. Call [`Self::revalidate`] to refresh
    /// its errors.
    pub fn set_validators(&mut self, path: &str, validators: Validators) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        field_mut(&mut self.root, &path)?.set_validators(validators);
        Ok(())
    }

    pub fn clear_validators(&mut self, path: &str) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        field_mut(&mut self.root, &path)?.clear_validators();
        Ok(())
    }

    /// Re-run the validators of a node (deeply, for containers) and of every
    /// ancestor group.
    pub fn revalidate(&mut self, path: &str) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        revalidate_at(&mut self.root, &path)
    }

    /// Register a rule and apply it to the driver's current value.
    pub fn add_rule(&mut self, rule: Rule) -> Result<(), FormError> {
        for path in [rule.driver(), rule.dependent()] {
            if !matches!(self.node_at(path)?, NodeRef::Field(_)) {
                return Err(FormError::NotAField(path.clone()));
            }
        }
        let driver = rule.driver().clone();
        self.rules.push(rule);
        self.apply_rules(&driver);
        Ok(())
    }

    /// Call `listener` after every change of the field at `path`.
    pub fn subscribe(
        &mut self,
        path: &str,
        listener: impl FnMut(&FieldPath, &FormValue) + 'static,
    ) -> Result<ListenerId, FormError> {
        let path = FieldPath::parse(path)?;
        if !matches!(self.node_at(&path)?, NodeRef::Field(_)) {
            return Err(FormError::NotAField(path));
        }
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.subscriptions.push(Subscription {
            id,
            path,
            listener: Box::new(listener),
        });
        Ok(id)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    fn propagate(&mut self, changed: Vec<FieldPath>) {
        for path in &changed {
            if let Some(NodeMut::Field(f)) = self.root.resolve_mut(path) {
                let errors = f.revalidate();
                trace!(path = %path, errors = %errors, "field revalidated");
            }
            revalidate_ancestors(&mut self.root, path);
        }
        for path in &changed {
            self.apply_rules(path);
        }
        self.notify(&changed);
    }

    fn apply_rules(&mut self, driver: &FieldPath) {
        let Some(NodeRef::Field(f)) = self.root.resolve(driver) else {
            return;
        };
        let value = f.value().clone();
        for rule in self.rules.driven_by(driver) {
            apply_rule(&mut self.root, rule, &value);
        }
    }

    fn apply_rules_under(&mut self, prefix: &FieldPath) {
        for rule in self.rules.driven_under(prefix) {
            if let Some(NodeRef::Field(f)) = self.root.resolve(rule.driver()) {
                let value = f.value().clone();
                apply_rule(&mut self.root, rule, &value);
            }
        }
    }

    fn notify(&mut self, changed: &[FieldPath]) {
        for path in changed {
            let Some(NodeRef::Field(f)) = self.root.resolve(path) else {
                continue;
            };
            let value = f.value();
            for sub in self.subscriptions.iter_mut().filter(|s| s.path == *path) {
                (sub.listener)(path, value);
            }
        }
    }
}

impl fmt::Debug for FormModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormModel")
            .field("root", &self.root)
            .field("rules", &self.rules)
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tree helpers
// -----------------------------------------------------------------------------

fn field_mut<'a>(root: &'a mut GroupState, path: &FieldPath) -> Result<&'a mut FieldState, FormError> {
    match root.resolve_mut(path) {
        Some(NodeMut::Field(f)) => Ok(f),
        Some(_) => Err(FormError::NotAField(path.clone())),
        None => Err(FormError::UnknownPath(path.clone())),
    }
}

fn group_mut<'a>(root: &'a mut GroupState, path: &FieldPath) -> Result<&'a mut GroupState, FormError> {
    match root.resolve_mut(path) {
        Some(NodeMut::Group(g)) => Ok(g),
        Some(_) => Err(FormError::NotAGroup(path.clone())),
        None => Err(FormError::UnknownPath(path.clone())),
    }
}

fn list_mut<'a>(root: &'a mut GroupState, path: &FieldPath) -> Result<&'a mut ListState, FormError> {
    match root.resolve_mut(path) {
        Some(NodeMut::List(l)) => Ok(l),
        Some(_) => Err(FormError::NotAList(path.clone())),
        None => Err(FormError::UnknownPath(path.clone())),
    }
}

fn revalidate_ancestors(root: &mut GroupState, path: &FieldPath) {
    for ancestor in path.ancestors() {
        if let Some(NodeMut::Group(g)) = root.resolve_mut(&ancestor) {
            g.revalidate_own();
        }
    }
}

fn revalidate_at(root: &mut GroupState, path: &FieldPath) -> Result<(), FormError> {
    root.resolve_mut(path)
        .ok_or_else(|| FormError::UnknownPath(path.clone()))?
        .revalidate_deep();
    revalidate_ancestors(root, path);
    Ok(())
}

fn apply_rule(root: &mut GroupState, rule: &Rule, driver_value: &FormValue) {
    let validators = rule.derive(driver_value);
    let Some(NodeMut::Field(dependent)) = root.resolve_mut(rule.dependent()) else {
        warn!(
            driver = %rule.driver(),
            dependent = %rule.dependent(),
            "rule dependent no longer resolves to a field, skipped"
        );
        return;
    };
    debug!(
        driver = %rule.driver(),
        dependent = %rule.dependent(),
        validators = validators.len(),
        "rule applied"
    );
    dependent.set_validators(validators);
    dependent.revalidate();
    revalidate_ancestors(root, rule.dependent());
}

fn patch_group(
    group: &mut GroupState,
    tree: &ValueTree,
    at: &FieldPath,
    changed: &mut Vec<FieldPath>,
) {
    let ValueTree::Group(entries) = tree else {
        debug!(path = %at, "patch expects a group here, skipped");
        return;
    };
    for (name, sub) in entries {
        let path = at.child(name.clone());
        match group.get_mut(name) {
            Some(node) => patch_node(node.as_mut(), sub, &path, changed),
            None => debug!(path = %path, "patch names no such member, skipped"),
        }
    }
}

fn patch_node(node: NodeMut<'_>, tree: &ValueTree, at: &FieldPath, changed: &mut Vec<FieldPath>) {
    match (node, tree) {
        (NodeMut::Field(f), ValueTree::Value(v)) => {
            f.patch_value(v.clone());
            changed.push(at.clone());
        }
        (NodeMut::Group(g), ValueTree::Group(_)) => patch_group(g, tree, at, changed),
        (NodeMut::List(l), ValueTree::List(items)) => {
            for (i, item) in items.iter().enumerate() {
                let path = at.index(i);
                match l.get_mut(i) {
                    Some(g) => patch_group(g, item, &path, changed),
                    None => debug!(path = %path, "patch entry beyond list length, skipped"),
                }
            }
        }
        (node, _) => debug!(path = %at, kind = node.kind(), "patch shape mismatch, skipped"),
    }
}
