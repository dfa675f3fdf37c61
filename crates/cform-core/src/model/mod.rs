#![forbid(unsafe_code)]

//! The form tree: fields, groups, lists, values, and paths.

mod field;
mod group;
mod list;
mod node;
mod path;
mod value;

pub use field::FieldState;
pub use group::GroupState;
pub use list::ListState;
pub use node::{Node, NodeMut, NodeRef};
pub use path::{FieldPath, Segment};
pub use value::{FormValue, ValueTree};
