use super::{
    event::{EngineEvent, Slice},
    observer::Observer,
    state::{ClusterCtx, JobId, Time},
};
use crate::error::EngineError;
use crate::scheduler::{Policy, ENQ_PREEMPT, ENQ_WAKEUP};

/// Event-driven dispatch core. Owns the cluster state and a scheduling policy
/// and exposes the primitives the simulation driver sequences: admit arrivals,
/// requeue preempted jobs, fill idle CPUs, advance the clock to the next
/// slice expiry.
///
/// The clock moves to event times, never by fixed ticks; chunk and burst
/// values are fractional reals.
pub struct Engine<P: Policy> {
    pub ctx: ClusterCtx,
    pub policy: P,
    observer: Observer,
    slices: Vec<Slice>,
}

impl<P: Policy> Engine<P> {
    pub fn new(num_cpus: usize, chunk_unit: Time) -> Self {
        let mut ctx = ClusterCtx::new(num_cpus, chunk_unit);
        let policy = P::init(&mut ctx);
        Self {
            ctx,
            policy,
            observer: Observer::new(),
            slices: Vec::new(),
        }
    }

    pub fn now(&self) -> Time {
        self.ctx.now
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Admit a newly arrived job and hand it to the policy.
    pub fn admit(&mut self, arrival: Time, burst: Time, events: &mut Vec<EngineEvent>) -> JobId {
        let job = self.ctx.admit_job(arrival, burst);
        events.push(EngineEvent::JobAdmitted { job });
        self.policy.enqueue(&mut self.ctx, job, ENQ_WAKEUP);
        job
    }

    /// Return preempted jobs to the policy. Called after same-instant arrivals
    /// have been admitted, so fresh arrivals queue ahead of preempted jobs.
    pub fn requeue_preempted(&mut self, jobs: &[JobId]) {
        for &job in jobs {
            self.policy.enqueue(&mut self.ctx, job, ENQ_PREEMPT);
        }
    }

    /// Give every idle CPU work, lowest-numbered CPU first. Each dispatched
    /// job runs for min(remaining, chunk unit); the final chunk equals the
    /// remaining burst exactly, so remaining hits zero with no drift.
    pub fn dispatch_idle(&mut self, events: &mut Vec<EngineEvent>) {
        let now = self.ctx.now;
        for cpu in 0..self.ctx.cpus.len() {
            if !self.ctx.cpu_is_idle(cpu) {
                continue;
            }

            match self.policy.dispatch(&mut self.ctx, cpu) {
                Some(job) => {
                    let chunk_unit = self.ctx.chunk_unit;
                    let ctl = self.ctx.job_mut(job);
                    let chunk = ctl.remaining.min(chunk_unit);
                    ctl.remaining -= chunk;
                    self.ctx.set_running(cpu, job, now + chunk);
                    self.slices.push(Slice {
                        job,
                        cpu,
                        start: now,
                        end: now + chunk,
                    });
                    events.push(EngineEvent::JobDispatched { job, cpu, chunk });
                }
                None => events.push(EngineEvent::CpuIdle { cpu }),
            }
        }
    }

    /// Move the clock to `t` and reclaim every CPU whose chunk ends at or
    /// before `t`. Jobs that finished their burst are completed; the rest are
    /// returned for requeueing once same-instant arrivals are in.
    pub fn advance_to(&mut self, t: Time, events: &mut Vec<EngineEvent>) -> Vec<JobId> {
        debug_assert!(t >= self.ctx.now, "clock may not move backwards");
        self.ctx.now = t;

        let mut preempted = Vec::new();
        for cpu in 0..self.ctx.cpus.len() {
            let (job, busy_until) = match self.ctx.cpus[cpu].current {
                Some(job) => (job, self.ctx.cpus[cpu].busy_until),
                None => continue,
            };
            if busy_until > t {
                continue;
            }

            self.ctx.clear_cpu(cpu);
            if self.ctx.job(job).remaining == 0.0 {
                self.ctx.mark_completed(job, busy_until);
                events.push(EngineEvent::JobCompleted {
                    job,
                    at: busy_until,
                });
            } else {
                self.ctx.mark_ready(job);
                events.push(EngineEvent::JobPreempted { job, cpu });
                preempted.push(job);
            }
        }

        preempted
    }

    pub fn check_invariants(&mut self) -> Result<(), EngineError> {
        self.observer.observe(&self.ctx)
    }

    pub fn audit_trace(&self) -> Result<(), EngineError> {
        self.observer.audit_trace(&self.ctx, &self.slices)
    }
}
