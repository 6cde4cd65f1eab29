//! Event records.

use crate::typeinfo::{elements::Parameter, flags::AccessFlags};

/// An event declared by the class.
///
/// The delegate signature is carried either by reference (`delegate_name`, for
/// `DELEGATE`-typed events) or inline as a parameter list, mirroring how the
/// compiler emits the two declaration forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventElement {
    /// Event name.
    pub name: String,
    /// Visibility and modifier bits.
    pub flags: AccessFlags,
    /// Name of the delegate type, empty for signature-declared events.
    pub delegate_name: String,
    /// Signature parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Zero-based declaration index among the class's events.
    pub position: u32,
    /// Source line of the declaration (OE12 only; zero in 11xx artifacts).
    pub source_line: u32,
}
