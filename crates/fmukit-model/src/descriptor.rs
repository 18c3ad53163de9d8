//! The [`ModelDescriptor`]: a model definition as validated plain data.
//!
//! A descriptor carries everything the generation pipeline used to bake
//! into source: the GUID, the ordered input names, and one relationship
//! function per output. The runtime engine consumes it unchanged, so one
//! generic engine serves every model.

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;

use crate::reference::{ValueReference, VariableKind};

/// A pure relationship function mapping the full input vector to one
/// output's value.
///
/// # Contract
///
/// - Deterministic: the same input vector produces the same value.
/// - Side-effect-free: reads nothing beyond the passed slice, writes
///   nothing. The engine re-invokes the function on every read of its
///   output and never caches the result.
/// - The slice always has length [`ModelDescriptor::input_count`], in
///   declared input order.
pub type Relation = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// One derived output: its name and its relationship function.
pub struct OutputDef {
    /// Variable name as it appears in the metadata document.
    pub name: String,
    /// The pure function computing this output from the input vector.
    pub relation: Relation,
}

impl OutputDef {
    /// Convenience constructor boxing the relation closure.
    pub fn new(
        name: impl Into<String>,
        relation: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            relation: Box::new(relation),
        }
    }
}

impl fmt::Debug for OutputDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputDef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Errors detected while constructing a [`ModelDescriptor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DescriptorError {
    /// The model name is empty.
    EmptyModelName,
    /// The GUID is empty.
    EmptyGuid,
    /// The model declares no outputs; nothing would ever be computed.
    NoOutputs,
    /// A variable name is empty.
    EmptyVariableName {
        /// Position of the offending variable in declaration order.
        index: usize,
    },
    /// The same name appears twice across the union of inputs and outputs.
    DuplicateVariableName {
        /// The repeated name.
        name: String,
    },
    /// Total variable count exceeds `u32::MAX` and cannot be addressed
    /// by a value reference.
    VariableCountOverflow {
        /// The count that overflowed.
        count: usize,
    },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyModelName => write!(f, "model name is empty"),
            Self::EmptyGuid => write!(f, "GUID is empty"),
            Self::NoOutputs => write!(f, "model declares no outputs"),
            Self::EmptyVariableName { index } => {
                write!(f, "variable at position {index} has an empty name")
            }
            Self::DuplicateVariableName { name } => {
                write!(f, "variable name '{name}' declared more than once")
            }
            Self::VariableCountOverflow { count } => {
                write!(f, "variable count {count} exceeds u32::MAX")
            }
        }
    }
}

impl Error for DescriptorError {}

/// A complete, immutable model definition.
///
/// Value reference layout: inputs occupy `0..N-1` in declared order,
/// outputs occupy `N..N+M-1` in declared order. The layout depends only
/// on the declaration order, never on the GUID or on instance identity;
/// the companion metadata document asserts the same mapping.
pub struct ModelDescriptor {
    model_name: String,
    guid: String,
    inputs: Vec<String>,
    outputs: Vec<OutputDef>,
}

impl ModelDescriptor {
    /// Build and validate a descriptor.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] if the GUID or model name is empty,
    /// no outputs are declared, any variable name is empty or duplicated,
    /// or the variable count cannot be addressed by a `u32` reference.
    pub fn new(
        model_name: impl Into<String>,
        guid: impl Into<String>,
        inputs: Vec<String>,
        outputs: Vec<OutputDef>,
    ) -> Result<Self, DescriptorError> {
        let model_name = model_name.into();
        let guid = guid.into();

        if model_name.is_empty() {
            return Err(DescriptorError::EmptyModelName);
        }
        if guid.is_empty() {
            return Err(DescriptorError::EmptyGuid);
        }
        if outputs.is_empty() {
            return Err(DescriptorError::NoOutputs);
        }

        let count = inputs.len() + outputs.len();
        if u32::try_from(count).is_err() {
            return Err(DescriptorError::VariableCountOverflow { count });
        }

        let mut seen: IndexSet<&str> = IndexSet::with_capacity(count);
        let names = inputs.iter().chain(outputs.iter().map(|o| &o.name));
        for (index, name) in names.enumerate() {
            if name.is_empty() {
                return Err(DescriptorError::EmptyVariableName { index });
            }
            if !seen.insert(name.as_str()) {
                return Err(DescriptorError::DuplicateVariableName {
                    name: name.clone(),
                });
            }
        }

        Ok(Self {
            model_name,
            guid,
            inputs,
            outputs,
        })
    }

    /// The model name as used in the modeling environment.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// The GUID identifying this exact model definition.
    ///
    /// Compared verbatim against the GUID the master asserts at
    /// instantiation.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Number of declared inputs (N).
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of declared outputs (M).
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Total number of variables (N + M).
    pub fn variable_count(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    /// Classify a value reference as input, output, or out of range.
    pub fn kind_of(&self, vr: ValueReference) -> Option<VariableKind> {
        let idx = vr.0 as usize;
        if idx < self.inputs.len() {
            Some(VariableKind::Input)
        } else if idx < self.variable_count() {
            Some(VariableKind::Output)
        } else {
            None
        }
    }

    /// The declared name behind a value reference.
    pub fn name_of(&self, vr: ValueReference) -> Option<&str> {
        let idx = vr.0 as usize;
        if idx < self.inputs.len() {
            Some(self.inputs[idx].as_str())
        } else {
            self.outputs
                .get(idx - self.inputs.len())
                .map(|o| o.name.as_str())
        }
    }

    /// Look up a variable's value reference by name.
    ///
    /// Linear scan; descriptors are small and this is a test/diagnostic
    /// path, not the per-step data path.
    pub fn reference_of(&self, name: &str) -> Option<ValueReference> {
        let names = self.inputs.iter().chain(self.outputs.iter().map(|o| &o.name));
        for (idx, candidate) in names.enumerate() {
            if candidate == name {
                return Some(ValueReference(idx as u32));
            }
        }
        None
    }

    /// Evaluate the relationship function behind an output reference
    /// against `inputs`.
    ///
    /// Returns `None` for references that do not address an output.
    /// The caller supplies the current input snapshot; nothing is cached.
    pub fn evaluate(&self, vr: ValueReference, inputs: &[f64]) -> Option<f64> {
        let idx = (vr.0 as usize).checked_sub(self.inputs.len())?;
        self.outputs.get(idx).map(|o| (o.relation)(inputs))
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("model_name", &self.model_name)
            .field("guid", &self.guid)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_by_two() -> ModelDescriptor {
        ModelDescriptor::new(
            "adder",
            "guid-adder",
            vec!["x".into(), "y".into()],
            vec![
                OutputDef::new("sum", |v: &[f64]| v[0] + v[1]),
                OutputDef::new("diff", |v: &[f64]| v[0] - v[1]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn counts_reflect_declaration() {
        let m = two_by_two();
        assert_eq!(m.input_count(), 2);
        assert_eq!(m.output_count(), 2);
        assert_eq!(m.variable_count(), 4);
    }

    #[test]
    fn kind_partition_is_contiguous() {
        let m = two_by_two();
        assert_eq!(m.kind_of(ValueReference(0)), Some(VariableKind::Input));
        assert_eq!(m.kind_of(ValueReference(1)), Some(VariableKind::Input));
        assert_eq!(m.kind_of(ValueReference(2)), Some(VariableKind::Output));
        assert_eq!(m.kind_of(ValueReference(3)), Some(VariableKind::Output));
        assert_eq!(m.kind_of(ValueReference(4)), None);
    }

    #[test]
    fn names_follow_declared_order() {
        let m = two_by_two();
        assert_eq!(m.name_of(ValueReference(0)), Some("x"));
        assert_eq!(m.name_of(ValueReference(3)), Some("diff"));
        assert_eq!(m.name_of(ValueReference(4)), None);
        assert_eq!(m.reference_of("sum"), Some(ValueReference(2)));
        assert_eq!(m.reference_of("missing"), None);
    }

    #[test]
    fn evaluate_applies_relation_to_inputs() {
        let m = two_by_two();
        let inputs = [3.0, 1.5];
        assert_eq!(m.evaluate(ValueReference(2), &inputs), Some(4.5));
        assert_eq!(m.evaluate(ValueReference(3), &inputs), Some(1.5));
    }

    #[test]
    fn evaluate_rejects_input_and_out_of_range_references() {
        let m = two_by_two();
        assert_eq!(m.evaluate(ValueReference(0), &[0.0, 0.0]), None);
        assert_eq!(m.evaluate(ValueReference(9), &[0.0, 0.0]), None);
    }

    #[test]
    fn empty_guid_rejected() {
        let err = ModelDescriptor::new(
            "m",
            "",
            vec![],
            vec![OutputDef::new("o", |_: &[f64]| 0.0)],
        )
        .unwrap_err();
        assert_eq!(err, DescriptorError::EmptyGuid);
    }

    #[test]
    fn empty_model_name_rejected() {
        let err = ModelDescriptor::new(
            "",
            "g",
            vec![],
            vec![OutputDef::new("o", |_: &[f64]| 0.0)],
        )
        .unwrap_err();
        assert_eq!(err, DescriptorError::EmptyModelName);
    }

    #[test]
    fn no_outputs_rejected() {
        let err = ModelDescriptor::new("m", "g", vec!["x".into()], vec![]).unwrap_err();
        assert_eq!(err, DescriptorError::NoOutputs);
    }

    #[test]
    fn duplicate_name_across_partition_rejected() {
        let err = ModelDescriptor::new(
            "m",
            "g",
            vec!["x".into()],
            vec![OutputDef::new("x", |_: &[f64]| 0.0)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DuplicateVariableName { name: "x".into() }
        );
    }

    #[test]
    fn empty_variable_name_rejected_with_position() {
        let err = ModelDescriptor::new(
            "m",
            "g",
            vec!["x".into(), "".into()],
            vec![OutputDef::new("o", |_: &[f64]| 0.0)],
        )
        .unwrap_err();
        assert_eq!(err, DescriptorError::EmptyVariableName { index: 1 });
    }

    #[test]
    fn zero_input_model_is_valid() {
        let m = ModelDescriptor::new(
            "const",
            "guid-const",
            vec![],
            vec![OutputDef::new("k", |_: &[f64]| 42.0)],
        )
        .unwrap();
        assert_eq!(m.kind_of(ValueReference(0)), Some(VariableKind::Output));
        assert_eq!(m.evaluate(ValueReference(0), &[]), Some(42.0));
    }

    proptest! {
        /// Layout invariant: for any declaration shape, references 0..N-1
        /// are inputs and N..N+M-1 are outputs, independent of the GUID.
        #[test]
        fn reference_layout_matches_declaration(
            n_inputs in 0usize..16,
            n_outputs in 1usize..16,
            guid in "[a-z0-9-]{1,24}",
        ) {
            let inputs: Vec<String> = (0..n_inputs).map(|i| format!("in{i}")).collect();
            let outputs: Vec<OutputDef> = (0..n_outputs)
                .map(|i| OutputDef::new(format!("out{i}"), |_: &[f64]| 0.0))
                .collect();
            let m = ModelDescriptor::new("m", guid, inputs, outputs).unwrap();

            for vr in 0..n_inputs {
                prop_assert_eq!(
                    m.kind_of(ValueReference(vr as u32)),
                    Some(VariableKind::Input)
                );
            }
            for vr in n_inputs..n_inputs + n_outputs {
                prop_assert_eq!(
                    m.kind_of(ValueReference(vr as u32)),
                    Some(VariableKind::Output)
                );
            }
            prop_assert_eq!(
                m.kind_of(ValueReference((n_inputs + n_outputs) as u32)),
                None
            );
        }

        /// Round trip: every declared name resolves to the reference that
        /// names it back.
        #[test]
        fn name_reference_round_trip(n_inputs in 0usize..8, n_outputs in 1usize..8) {
            let inputs: Vec<String> = (0..n_inputs).map(|i| format!("in{i}")).collect();
            let outputs: Vec<OutputDef> = (0..n_outputs)
                .map(|i| OutputDef::new(format!("out{i}"), |_: &[f64]| 0.0))
                .collect();
            let m = ModelDescriptor::new("m", "g", inputs, outputs).unwrap();

            for vr in 0..m.variable_count() {
                let vr = ValueReference(vr as u32);
                let name = m.name_of(vr).unwrap().to_owned();
                prop_assert_eq!(m.reference_of(&name), Some(vr));
            }
        }
    }
}
