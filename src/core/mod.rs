pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::Engine;
pub use event::{EngineEvent, Slice};
pub use state::{ClusterCtx, CpuId, CpuState, JobCtl, JobId, JobState, QueueId, Rank, RunQueue, Time};
