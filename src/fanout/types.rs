use crate::instances::types::Instance;
use serde::Serialize;
use thiserror::Error;

/// Diagnostic for one instance whose operation failed during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceFailure {
    pub instance: String,
    pub message: String,
}

/// Outcome of one instance's operation.
///
/// A dispatch produces exactly one of these per input instance. A failed
/// instance contributes an empty `items` list and carries its `failure`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerInstanceResult<T> {
    pub instance: Instance,
    pub items: Vec<T>,
    pub failure: Option<InstanceFailure>,
}

impl<T> PerInstanceResult<T> {
    pub fn succeeded(instance: Instance, items: Vec<T>) -> Self {
        Self {
            instance,
            items,
            failure: None,
        }
    }

    pub fn failed(instance: Instance, message: String) -> Self {
        let failure = InstanceFailure {
            instance: instance.name.clone(),
            message,
        };
        Self {
            instance,
            items: Vec::new(),
            failure: Some(failure),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// The dispatch itself was broken, as opposed to an instance failing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrchestrationError {
    #[error("operation for instance '{instance}' panicked")]
    OperationPanicked { instance: String },
}
