//! The per-instance variable store and bounds-checked reference access.
//!
//! Only inputs are stored; outputs are derived on every read by the
//! descriptor's relationship functions and never materialized. Each
//! [`VariableStore`] is exclusively owned by its instance — there is no
//! process-wide storage, so concurrently live instances and sequential
//! create/free cycles can never observe each other's state.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use fmukit_model::{ModelDescriptor, ValueReference, VariableKind};
use smallvec::SmallVec;

/// Errors from value-reference-indexed access.
///
/// All variants are operational: the offending batch is refused as a
/// whole and the store is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// A reference does not address any declared variable.
    OutOfRange {
        /// The offending reference.
        vr: ValueReference,
        /// Number of declared variables; valid references are `0..count`.
        count: u32,
    },
    /// A write addressed an output reference. Outputs are derived,
    /// never stored.
    WriteToDerived {
        /// The offending reference.
        vr: ValueReference,
    },
    /// The reference and value arrays disagree in length.
    LengthMismatch {
        /// Number of references supplied.
        references: usize,
        /// Number of values supplied.
        values: usize,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { vr, count } => {
                write!(f, "value reference {vr} out of range (model has {count} variables)")
            }
            Self::WriteToDerived { vr } => {
                write!(f, "value reference {vr} addresses a derived output and cannot be set")
            }
            Self::LengthMismatch { references, values } => {
                write!(f, "{references} references but {values} values")
            }
        }
    }
}

impl Error for AccessError {}

/// Fixed-size, value-reference-indexed storage for one instance.
pub struct VariableStore {
    descriptor: Arc<ModelDescriptor>,
    inputs: Vec<f64>,
}

impl VariableStore {
    /// Create a store with all inputs zero-initialised.
    pub fn new(descriptor: Arc<ModelDescriptor>) -> Self {
        let inputs = vec![0.0; descriptor.input_count()];
        Self { descriptor, inputs }
    }

    /// The descriptor this store is laid out against.
    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    /// The current input vector, in declared order.
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// Reset every input to zero.
    pub fn clear(&mut self) {
        self.inputs.fill(0.0);
    }

    /// Write a batch of input variables.
    ///
    /// The whole batch is validated before anything is applied: an
    /// out-of-range reference, a reference addressing an output, or a
    /// length mismatch rejects the batch and leaves the store unchanged.
    pub fn set_many(
        &mut self,
        references: &[ValueReference],
        values: &[f64],
    ) -> Result<(), AccessError> {
        if references.len() != values.len() {
            return Err(AccessError::LengthMismatch {
                references: references.len(),
                values: values.len(),
            });
        }

        let mut staged: SmallVec<[(usize, f64); 8]> = SmallVec::with_capacity(references.len());
        for (&vr, &value) in references.iter().zip(values) {
            match self.descriptor.kind_of(vr) {
                Some(VariableKind::Input) => staged.push((vr.0 as usize, value)),
                Some(VariableKind::Output) => {
                    return Err(AccessError::WriteToDerived { vr });
                }
                None => {
                    return Err(AccessError::OutOfRange {
                        vr,
                        count: self.descriptor.variable_count() as u32,
                    });
                }
            }
        }

        for (idx, value) in staged {
            self.inputs[idx] = value;
        }
        Ok(())
    }

    /// Read a batch of variables into `out`.
    ///
    /// Inputs are returned from storage; outputs are evaluated lazily
    /// against the current input snapshot on every call — never cached,
    /// so repeated reads with no intervening write are identical and a
    /// write is visible to the very next read. All references are
    /// validated before `out` is touched.
    pub fn get_many(
        &self,
        references: &[ValueReference],
        out: &mut [f64],
    ) -> Result<(), AccessError> {
        if references.len() != out.len() {
            return Err(AccessError::LengthMismatch {
                references: references.len(),
                values: out.len(),
            });
        }

        for &vr in references {
            if self.descriptor.kind_of(vr).is_none() {
                return Err(AccessError::OutOfRange {
                    vr,
                    count: self.descriptor.variable_count() as u32,
                });
            }
        }

        for (&vr, slot) in references.iter().zip(out.iter_mut()) {
            *slot = match self.descriptor.kind_of(vr) {
                Some(VariableKind::Input) => self.inputs[vr.0 as usize],
                Some(VariableKind::Output) => self
                    .descriptor
                    .evaluate(vr, &self.inputs)
                    .unwrap_or_default(),
                // Unreachable: every reference was validated above.
                None => 0.0,
            };
        }
        Ok(())
    }
}

impl fmt::Debug for VariableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableStore")
            .field("inputs", &self.inputs)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
