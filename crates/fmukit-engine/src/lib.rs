//! Instance lifecycle and variable store for the fmukit FMI 2.0
//! co-simulation runtime.
//!
//! An [`Instance`] is one independently-owned simulation component: a
//! lifecycle state machine, a per-instance input store, and lazy
//! evaluation of derived outputs against a shared, immutable
//! [`ModelDescriptor`](fmukit_model::ModelDescriptor). The engine is
//! pure Rust with typed errors; the FFI crate maps those errors onto the
//! FMI status vocabulary and the caller-supplied logging callback.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod instance;
pub mod state;
pub mod store;

pub use instance::{ApiError, Experiment, Instance};
pub use state::{LifecycleState, Operation, StateError};
pub use store::{AccessError, VariableStore};
