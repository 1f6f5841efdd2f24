use super::{EnqueueFlags, Policy};
use crate::core::state::{ClusterCtx, CpuId, JobId, QueueId, Rank};

/// Shortest-remaining-time-first over chunk boundaries: the ready set is a
/// ranked queue keyed by (remaining burst, arrival, id), smallest first. The
/// rank is computed at enqueue time; remaining burst only changes while a job
/// runs, and running jobs are never queued, so stored ranks stay valid.
pub struct Strf {
    ready: QueueId,
}

impl Policy for Strf {
    fn init(ctx: &mut ClusterCtx) -> Self {
        Self {
            ready: ctx.create_queue_ranked(),
        }
    }

    fn enqueue(&mut self, ctx: &mut ClusterCtx, job: JobId, _flags: EnqueueFlags) {
        let ctl = ctx.job(job);
        let rank = Rank {
            remaining: ctl.remaining,
            arrival: ctl.arrival,
            job,
        };
        ctx.queue_push_ranked(self.ready, job, rank);
    }

    fn dispatch(&mut self, ctx: &mut ClusterCtx, _cpu: CpuId) -> Option<JobId> {
        ctx.queue_pop(self.ready)
    }
}
