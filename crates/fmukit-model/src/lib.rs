//! Model definition types for the fmukit FMI 2.0 co-simulation runtime.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! model description as pure data: ordered input and output names, one
//! relationship function per output, and the GUID that binds the runtime
//! to its companion `modelDescription.xml`. The runtime engine consumes a
//! [`ModelDescriptor`] directly — there is no source-level code generation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod descriptor;
pub mod reference;

pub use descriptor::{DescriptorError, ModelDescriptor, OutputDef, Relation};
pub use reference::{ValueReference, VariableKind};
