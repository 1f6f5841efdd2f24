use thiserror::Error;

/// Failure taxonomy for a simulation run.
///
/// `InvalidConfiguration` and `InapplicableInput` are caller errors reported
/// before the clock starts. `InternalInconsistency` means the engine broke one
/// of its own invariants mid-run; it indicates a defect in the engine, never
/// in the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("inapplicable input: {0}")]
    InapplicableInput(String),

    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}
