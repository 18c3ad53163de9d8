//! Value references and the input/output variable partition.

use std::fmt;

/// Identifies one model variable.
///
/// Value references are assigned at descriptor construction and are a
/// binding contract with the companion metadata document: references
/// `0..N-1` address the N inputs in declared order, `N..N+M-1` address
/// the M outputs in declared order. Changing the assignment scheme is a
/// breaking change for every packaged artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueReference(pub u32);

impl fmt::Display for ValueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ValueReference {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Which side of the variable partition a reference falls in.
///
/// Inputs are stored; outputs are derived on read and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    /// Externally written variable, held in the per-instance store.
    Input,
    /// Variable computed from the input vector by a relationship function.
    Output,
}
