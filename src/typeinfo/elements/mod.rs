//! Decoded member records of a class type block.
//!
//! Every element is built exactly once by the version-specific decoders and is
//! immutable afterwards. Strings are owned copies resolved from the string pool;
//! nothing here borrows from the raw type block. The `position` carried by each
//! element is its zero-based declaration index within its member kind, usable as
//! a tiebreaker when sorting members by name.

mod event;
mod method;
mod property;
mod table;
mod variable;

pub use event::EventElement;
pub use method::{MethodElement, Parameter};
pub use property::{PropertyAccessor, PropertyElement};
pub use table::{TableElement, TableField, TableIndex};
pub use variable::VariableElement;
