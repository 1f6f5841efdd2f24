pub mod driver;
pub mod job;
pub mod report;

pub use driver::{simulate, ClusterConfig, Sim, SimulationResult};
pub use job::{JobReport, JobSpec};
pub use report::render_report;
