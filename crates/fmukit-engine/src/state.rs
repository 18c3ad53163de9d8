//! The instance lifecycle state machine.
//!
//! The co-simulation protocol fixes the legal call ordering:
//!
//! ```text
//! Instantiated --setup_experiment--> ExperimentConfigured
//! ExperimentConfigured --enter_initialization_mode--> InitializationMode
//! InitializationMode --exit_initialization_mode--> StepComplete
//! StepComplete --do_step--> StepComplete
//! StepComplete --terminate--> Terminated
//! any state --reset--> Instantiated
//! ```
//!
//! A call issued outside its legal state is an operational error, not a
//! fault: it is rejected with a [`StateError`] and leaves the instance
//! unchanged.

use std::error::Error;
use std::fmt;

/// Phase of an instance within the co-simulation protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Fresh instance; only `setup_experiment` (or `reset`) is legal.
    Instantiated,
    /// Experiment bounds received; awaiting initialization mode.
    ExperimentConfigured,
    /// Between enter- and exit-initialization-mode.
    InitializationMode,
    /// Initialized and steppable; `do_step` keeps the instance here.
    StepComplete,
    /// Terminated; values remain readable, nothing else is legal.
    Terminated,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instantiated => "Instantiated",
            Self::ExperimentConfigured => "ExperimentConfigured",
            Self::InitializationMode => "InitializationMode",
            Self::StepComplete => "StepComplete",
            Self::Terminated => "Terminated",
        };
        write!(f, "{name}")
    }
}

/// An externally-visible operation governed by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Receive experiment bounds.
    SetupExperiment,
    /// Enter initialization mode.
    EnterInitializationMode,
    /// Leave initialization mode.
    ExitInitializationMode,
    /// Advance one communication step.
    DoStep,
    /// End the simulation run.
    Terminate,
    /// Write input variables.
    SetReal,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SetupExperiment => "setup_experiment",
            Self::EnterInitializationMode => "enter_initialization_mode",
            Self::ExitInitializationMode => "exit_initialization_mode",
            Self::DoStep => "do_step",
            Self::Terminate => "terminate",
            Self::SetReal => "set_real",
        };
        write!(f, "{name}")
    }
}

/// An operation was issued in a state where it is not legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateError {
    /// The rejected operation.
    pub op: Operation,
    /// The state the instance was in when the call arrived.
    pub state: LifecycleState,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not legal in state {}", self.op, self.state)
    }
}

impl Error for StateError {}
