use super::{EnqueueFlags, Policy};
use crate::core::state::{ClusterCtx, CpuId, JobId, QueueId};

/// Quantum-based round robin: a single FIFO ready queue. Arrivals and
/// preempted jobs alike join at the tail, so equal-arrival jobs run in their
/// original index order and a preempted job waits for the whole queue to cycle
/// before running again.
pub struct RoundRobin {
    ready: QueueId,
}

impl Policy for RoundRobin {
    fn init(ctx: &mut ClusterCtx) -> Self {
        Self {
            ready: ctx.create_queue_fifo(),
        }
    }

    fn enqueue(&mut self, ctx: &mut ClusterCtx, job: JobId, _flags: EnqueueFlags) {
        ctx.queue_push_back(self.ready, job);
    }

    fn dispatch(&mut self, ctx: &mut ClusterCtx, _cpu: CpuId) -> Option<JobId> {
        ctx.queue_pop(self.ready)
    }
}
