//! Mapping from engine errors to C status codes.
//!
//! Every operational failure is `Error`: the call is refused, the
//! instance stays usable. `Fatal` is reserved for the boundary guards
//! (caught panics, poisoned locks) and never comes from the engine.

use fmukit_engine::{AccessError, ApiError, StateError};

use crate::types::Fmi2Status;

impl From<&StateError> for Fmi2Status {
    fn from(_: &StateError) -> Self {
        Fmi2Status::Error
    }
}

impl From<&AccessError> for Fmi2Status {
    fn from(_: &AccessError) -> Self {
        Fmi2Status::Error
    }
}

impl From<&ApiError> for Fmi2Status {
    fn from(e: &ApiError) -> Self {
        match e {
            ApiError::State(e) => Fmi2Status::from(e),
            ApiError::Access(e) => Fmi2Status::from(e),
        }
    }
}
