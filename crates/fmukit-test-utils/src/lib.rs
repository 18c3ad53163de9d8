//! Test utilities and model fixtures for fmukit development.

#![forbid(unsafe_code)]

mod fixtures;

pub use fixtures::{adder_model, constant_model, ADDER_GUID, CONSTANT_GUID};
