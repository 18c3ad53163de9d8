//! Reusable model fixtures.
//!
//! Two standard descriptors for engine and FFI testing:
//!
//! - [`adder_model`] — two inputs, two algebraic outputs. The workhorse
//!   fixture: it exercises the input/output partition, lazy evaluation,
//!   and the GUID check.
//! - [`constant_model`] — zero inputs, one constant output. Covers the
//!   degenerate N = 0 layout.

use fmukit_model::{ModelDescriptor, OutputDef};

/// GUID baked into [`adder_model`]; instantiation tests assert against it.
pub const ADDER_GUID: &str = "c0e9a04c-3e4b-4c53-a7f1-0d2a5f9e6b10";

/// GUID baked into [`constant_model`].
pub const CONSTANT_GUID: &str = "7b8a2f1d-9c6e-4d20-b3a4-5e1f8c7d2a90";

/// Descriptor with inputs `x`, `y` and outputs `sum = x + y`,
/// `weighted = 2x + 0.5y`.
pub fn adder_model() -> ModelDescriptor {
    ModelDescriptor::new(
        "adder",
        ADDER_GUID,
        vec!["x".into(), "y".into()],
        vec![
            OutputDef::new("sum", |v: &[f64]| v[0] + v[1]),
            OutputDef::new("weighted", |v: &[f64]| 2.0 * v[0] + 0.5 * v[1]),
        ],
    )
    .expect("adder fixture is valid")
}

/// Descriptor with no inputs and a single constant output `k = 42`.
pub fn constant_model() -> ModelDescriptor {
    ModelDescriptor::new(
        "constant",
        CONSTANT_GUID,
        vec![],
        vec![OutputDef::new("k", |_: &[f64]| 42.0)],
    )
    .expect("constant fixture is valid")
}
