pub mod round_robin;
pub mod strf;

use crate::core::state::{ClusterCtx, CpuId, JobId};

pub use round_robin::RoundRobin;
pub use strf::Strf;

pub type EnqueueFlags = u64;

/// Job just arrived at the cluster.
pub const ENQ_WAKEUP: EnqueueFlags = 1 << 0;
/// Job was preempted at a chunk boundary and re-enters the ready set.
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 1;

/// A preemptive scheduling policy. The policy owns its run queues (created
/// through the cluster context) and decides which ready job an idle CPU picks
/// up next; chunk accounting and the clock belong to the engine.
pub trait Policy {
    fn init(ctx: &mut ClusterCtx) -> Self;

    /// A job entered the ready set, either on arrival or after preemption.
    fn enqueue(&mut self, ctx: &mut ClusterCtx, job: JobId, flags: EnqueueFlags);

    /// Pick the next job for an idle CPU, or None to leave it idle.
    fn dispatch(&mut self, ctx: &mut ClusterCtx, cpu: CpuId) -> Option<JobId>;
}
