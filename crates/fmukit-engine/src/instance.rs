//! The [`Instance`]: one independently-owned simulation component.
//!
//! # Ownership model
//!
//! Each `Instance` exclusively owns its [`VariableStore`]; the
//! [`ModelDescriptor`](fmukit_model::ModelDescriptor) is shared immutably
//! via `Arc`. All mutating methods take `&mut self` and run to completion
//! on the calling thread — the co-simulation master never calls one
//! instance reentrantly, so there is no internal locking. Dropping an
//! instance releases its store without touching any other live instance.

use std::fmt;
use std::sync::Arc;

use fmukit_model::{ModelDescriptor, ValueReference};

use crate::state::{LifecycleState, Operation, StateError};
use crate::store::{AccessError, VariableStore};

// Compile-time assertion: Instance is Send, so the FFI crate can keep
// instances in a process-wide table touched from any calling thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Instance>();
    }
};

/// Experiment bounds received via `setup_experiment`.
///
/// The algebraic model class never integrates over time, so these are
/// retained as data for diagnostics rather than consumed by a solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Experiment {
    /// Simulation start time.
    pub start_time: f64,
    /// Optional stop time; `None` when the master left it undefined.
    pub stop_time: Option<f64>,
    /// Optional relative tolerance; `None` when undefined.
    pub tolerance: Option<f64>,
}

/// Either kind of operational failure an instance can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Operation issued in an illegal lifecycle state.
    State(StateError),
    /// Invalid value-reference access.
    Access(AccessError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(e) => write!(f, "{e}"),
            Self::Access(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::State(e) => Some(e),
            Self::Access(e) => Some(e),
        }
    }
}

impl From<StateError> for ApiError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

/// One live simulation component: state machine plus variable store.
pub struct Instance {
    name: String,
    state: LifecycleState,
    store: VariableStore,
    experiment: Option<Experiment>,
}

impl Instance {
    /// Create a fresh instance in the `Instantiated` state with a
    /// zeroed store.
    pub fn new(name: impl Into<String>, descriptor: Arc<ModelDescriptor>) -> Self {
        Self {
            name: name.into(),
            state: LifecycleState::Instantiated,
            store: VariableStore::new(descriptor),
            experiment: None,
        }
    }

    /// The instance name supplied at instantiation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The shared model definition.
    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        self.store.descriptor()
    }

    /// Experiment bounds, once `setup_experiment` has been called.
    pub fn experiment(&self) -> Option<&Experiment> {
        self.experiment.as_ref()
    }

    fn require(&self, expected: LifecycleState, op: Operation) -> Result<(), StateError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(StateError {
                op,
                state: self.state,
            })
        }
    }

    /// Receive experiment bounds. Legal only in `Instantiated`.
    pub fn setup_experiment(&mut self, experiment: Experiment) -> Result<(), StateError> {
        self.require(LifecycleState::Instantiated, Operation::SetupExperiment)?;
        self.experiment = Some(experiment);
        self.state = LifecycleState::ExperimentConfigured;
        Ok(())
    }

    /// Enter initialization mode. Legal only in `ExperimentConfigured`.
    pub fn enter_initialization_mode(&mut self) -> Result<(), StateError> {
        self.require(
            LifecycleState::ExperimentConfigured,
            Operation::EnterInitializationMode,
        )?;
        self.state = LifecycleState::InitializationMode;
        Ok(())
    }

    /// Leave initialization mode. Legal only in `InitializationMode`.
    pub fn exit_initialization_mode(&mut self) -> Result<(), StateError> {
        self.require(
            LifecycleState::InitializationMode,
            Operation::ExitInitializationMode,
        )?;
        self.state = LifecycleState::StepComplete;
        Ok(())
    }

    /// Mark one communication step. Legal only in `StepComplete`.
    ///
    /// The model class is purely algebraic, so the step performs no
    /// computation: outputs are functions of the current inputs alone
    /// and are evaluated on read. The call exists to satisfy protocol
    /// ordering and acknowledges synchronously.
    pub fn do_step(
        &mut self,
        _current_communication_point: f64,
        _step_size: f64,
    ) -> Result<(), StateError> {
        self.require(LifecycleState::StepComplete, Operation::DoStep)
    }

    /// End the simulation run. Legal only in `StepComplete`.
    pub fn terminate(&mut self) -> Result<(), StateError> {
        self.require(LifecycleState::StepComplete, Operation::Terminate)?;
        self.state = LifecycleState::Terminated;
        Ok(())
    }

    /// Return to the `Instantiated` state, clearing the store and the
    /// stored experiment. Legal in every state.
    pub fn reset(&mut self) {
        self.store.clear();
        self.experiment = None;
        self.state = LifecycleState::Instantiated;
    }

    /// Write input variables. Legal in every state except `Terminated`.
    ///
    /// The batch is atomic: any invalid reference rejects the whole call
    /// and the store is left unchanged.
    pub fn set_reals(
        &mut self,
        references: &[ValueReference],
        values: &[f64],
    ) -> Result<(), ApiError> {
        if self.state == LifecycleState::Terminated {
            return Err(StateError {
                op: Operation::SetReal,
                state: self.state,
            }
            .into());
        }
        self.store.set_many(references, values)?;
        Ok(())
    }

    /// Read variables into `out`. Legal in every state.
    ///
    /// Reading is side-effect-free: inputs come from storage, outputs
    /// are re-derived from the current input snapshot. Values remain
    /// readable after `terminate`.
    pub fn get_reals(
        &self,
        references: &[ValueReference],
        out: &mut [f64],
    ) -> Result<(), ApiError> {
        self.store.get_many(references, out)?;
        Ok(())
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("model", &self.descriptor().model_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmukit_test_utils::adder_model;

    fn instance() -> Instance {
        Instance::new("inst", Arc::new(adder_model()))
    }

    fn experiment() -> Experiment {
        Experiment {
            start_time: 0.0,
            stop_time: Some(10.0),
            tolerance: None,
        }
    }

    fn drive_to_step_complete(inst: &mut Instance) {
        inst.setup_experiment(experiment()).unwrap();
        inst.enter_initialization_mode().unwrap();
        inst.exit_initialization_mode().unwrap();
    }

    #[test]
    fn nominal_lifecycle_walks_every_state() {
        let mut inst = instance();
        assert_eq!(inst.state(), LifecycleState::Instantiated);
        inst.setup_experiment(experiment()).unwrap();
        assert_eq!(inst.state(), LifecycleState::ExperimentConfigured);
        inst.enter_initialization_mode().unwrap();
        assert_eq!(inst.state(), LifecycleState::InitializationMode);
        inst.exit_initialization_mode().unwrap();
        assert_eq!(inst.state(), LifecycleState::StepComplete);
        inst.do_step(0.0, 0.1).unwrap();
        assert_eq!(inst.state(), LifecycleState::StepComplete);
        inst.terminate().unwrap();
        assert_eq!(inst.state(), LifecycleState::Terminated);
    }

    #[test]
    fn do_step_before_initialization_is_rejected() {
        let mut inst = instance();
        let err = inst.do_step(0.0, 0.1).unwrap_err();
        assert_eq!(
            err,
            StateError {
                op: Operation::DoStep,
                state: LifecycleState::Instantiated,
            }
        );
    }

    #[test]
    fn enter_initialization_without_setup_is_rejected() {
        let mut inst = instance();
        let err = inst.enter_initialization_mode().unwrap_err();
        assert_eq!(err.op, Operation::EnterInitializationMode);
        assert_eq!(err.state, LifecycleState::Instantiated);
    }

    #[test]
    fn double_setup_experiment_is_rejected() {
        let mut inst = instance();
        inst.setup_experiment(experiment()).unwrap();
        let err = inst.setup_experiment(experiment()).unwrap_err();
        assert_eq!(err.state, LifecycleState::ExperimentConfigured);
    }

    #[test]
    fn terminate_requires_step_complete() {
        let mut inst = instance();
        assert!(inst.terminate().is_err());
        drive_to_step_complete(&mut inst);
        assert!(inst.terminate().is_ok());
    }

    #[test]
    fn set_after_terminate_is_rejected_but_get_still_works() {
        let mut inst = instance();
        drive_to_step_complete(&mut inst);
        inst.set_reals(&[ValueReference(0)], &[4.0]).unwrap();
        inst.terminate().unwrap();

        let err = inst.set_reals(&[ValueReference(0)], &[5.0]).unwrap_err();
        assert!(matches!(err, ApiError::State(_)));

        let mut out = [0.0];
        inst.get_reals(&[ValueReference(0)], &mut out).unwrap();
        assert_eq!(out, [4.0]);
    }

    #[test]
    fn reset_returns_to_instantiated_with_cleared_store() {
        let mut inst = instance();
        drive_to_step_complete(&mut inst);
        inst.set_reals(&[ValueReference(0)], &[9.0]).unwrap();
        inst.reset();

        assert_eq!(inst.state(), LifecycleState::Instantiated);
        assert!(inst.experiment().is_none());
        let mut out = [0.0];
        inst.get_reals(&[ValueReference(0)], &mut out).unwrap();
        assert_eq!(out, [0.0]);
        // The full lifecycle is legal again after reset.
        drive_to_step_complete(&mut inst);
        inst.do_step(0.0, 0.5).unwrap();
    }

    #[test]
    fn experiment_bounds_are_retained() {
        let mut inst = instance();
        inst.setup_experiment(Experiment {
            start_time: 1.5,
            stop_time: None,
            tolerance: Some(1e-6),
        })
        .unwrap();
        let exp = inst.experiment().unwrap();
        assert_eq!(exp.start_time, 1.5);
        assert_eq!(exp.stop_time, None);
        assert_eq!(exp.tolerance, Some(1e-6));
    }

    #[test]
    fn instances_are_isolated() {
        let descriptor = Arc::new(adder_model());
        let mut a = Instance::new("a", Arc::clone(&descriptor));
        let mut b = Instance::new("b", descriptor);

        a.set_reals(&[ValueReference(0)], &[1.0]).unwrap();
        b.set_reals(&[ValueReference(0)], &[2.0]).unwrap();

        let mut out = [0.0];
        a.get_reals(&[ValueReference(0)], &mut out).unwrap();
        assert_eq!(out, [1.0]);
        b.get_reals(&[ValueReference(0)], &mut out).unwrap();
        assert_eq!(out, [2.0]);

        // Dropping one instance leaves the other's state intact.
        drop(a);
        b.get_reals(&[ValueReference(0)], &mut out).unwrap();
        assert_eq!(out, [2.0]);
    }
}
