pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{EngineEvent, Slice};
pub use error::EngineError;
pub use scheduler::{Policy, RoundRobin, Strf};
pub use sim::{render_report, simulate, ClusterConfig, JobSpec, Sim, SimulationResult};
