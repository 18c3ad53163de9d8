//! C-compatible scalar types and enums from the FMI 2.0 standard headers.
//!
//! Aliases keep Rust naming while staying ABI-identical to the header
//! typedefs. Enum discriminants are fixed by the standard and must
//! never change.

use std::os::raw::{c_char, c_int, c_uint, c_void};

/// Opaque instance handle returned to the master (`fmi2Component`).
pub type Fmi2Component = *mut c_void;
/// Opaque master-side pointer echoed through the logger
/// (`fmi2ComponentEnvironment`).
pub type Fmi2ComponentEnvironment = *mut c_void;
/// Opaque captured-state handle (`fmi2FMUstate`). State capture is not
/// supported; this runtime never produces a non-null value.
pub type Fmi2FmuState = *mut c_void;
/// Variable address within the model (`fmi2ValueReference`).
pub type Fmi2ValueReference = c_uint;
/// `fmi2Real`.
pub type Fmi2Real = f64;
/// `fmi2Integer`.
pub type Fmi2Integer = c_int;
/// `fmi2Boolean`: an `int` where zero is false.
pub type Fmi2Boolean = c_int;
/// `fmi2Char`.
pub type Fmi2Char = c_char;
/// `fmi2String`: NUL-terminated, caller-owned.
pub type Fmi2String = *const c_char;
/// `fmi2Byte`.
pub type Fmi2Byte = c_char;

/// Status code returned by every `fmi2*` function (`fmi2Status`).
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fmi2Status {
    /// Call completed successfully.
    Ok = 0,
    /// Call completed with a caveat the master may want to log.
    Warning = 1,
    /// Result discarded; never produced by this runtime.
    Discard = 2,
    /// Operational error. The instance stays usable.
    Error = 3,
    /// Unrecoverable fault; reported when a panic is caught at the
    /// boundary.
    Fatal = 4,
    /// Asynchronous completion; never produced (every call here is
    /// synchronous).
    Pending = 5,
}

/// Kind of instance being created (`fmi2Type`).
///
/// An algebraic model behaves identically under both, so
/// `fmi2Instantiate` accepts either value.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fmi2Type {
    /// Model-exchange instance.
    ModelExchange = 0,
    /// Co-simulation instance.
    CoSimulation = 1,
}

/// Selector for the `fmi2Get*Status` query family (`fmi2StatusKind`).
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fmi2StatusKind {
    /// Status of the last asynchronous step.
    DoStepStatus = 0,
    /// Reason string for a pending step.
    PendingStatus = 1,
    /// Time reached by the last successful step.
    LastSuccessfulTime = 2,
    /// Whether the slave wants to terminate.
    Terminated = 3,
}
