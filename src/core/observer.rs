use super::event::Slice;
use super::state::{ClusterCtx, JobState, TIME_EPSILON};
use crate::error::EngineError;

/// Invariant auditor consulted at every decision point and once over the
/// finished trace. A violation is an engine defect, so it surfaces as
/// `InternalInconsistency` rather than a panic that would take down the
/// caller's render surface.
#[derive(Debug)]
pub struct Observer {
    steps: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { steps: 0 }
    }

    pub fn observe(&mut self, ctx: &ClusterCtx) -> Result<(), EngineError> {
        self.steps += 1;

        for job in &ctx.jobs {
            if job.remaining < 0.0 {
                return Err(inconsistency(format!(
                    "job {} has negative remaining burst {}",
                    job.id, job.remaining
                )));
            }
            if job.state == JobState::Completed {
                if job.remaining != 0.0 {
                    return Err(inconsistency(format!(
                        "completed job {} has nonzero remaining burst {}",
                        job.id, job.remaining
                    )));
                }
                if job.completion.is_none() {
                    return Err(inconsistency(format!(
                        "completed job {} has no completion time",
                        job.id
                    )));
                }
            }
        }

        for cpu in &ctx.cpus {
            if let Some(job_id) = cpu.current {
                let job = ctx.job(job_id);
                if job.state != JobState::Running {
                    return Err(inconsistency(format!(
                        "cpu {} claims job {} which is not Running",
                        cpu.id, job_id
                    )));
                }
                if job.current_cpu != Some(cpu.id) {
                    return Err(inconsistency(format!(
                        "job {} metadata disagrees with cpu {} claim",
                        job_id, cpu.id
                    )));
                }
            }
        }

        for (&job_id, &queue_id) in &ctx.job_to_queue {
            let job = ctx.job(job_id);
            if job.state != JobState::Ready {
                return Err(inconsistency(format!(
                    "queued job {} is {:?}, expected Ready",
                    job_id, job.state
                )));
            }
            match ctx.queues.get(queue_id) {
                Some(queue) if queue.contains(job_id) => {}
                Some(_) => {
                    return Err(inconsistency(format!(
                        "membership map claims job {} in queue {:?}, but the queue does not hold it",
                        job_id, queue_id
                    )));
                }
                None => {
                    return Err(inconsistency(format!(
                        "membership map references unknown queue {:?}",
                        queue_id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Whole-trace audit once the run is quiescent.
    pub fn audit_trace(&self, ctx: &ClusterCtx, slices: &[Slice]) -> Result<(), EngineError> {
        for job in &ctx.jobs {
            let executed: f64 = slices
                .iter()
                .filter(|s| s.job == job.id)
                .map(Slice::duration)
                .sum();
            if (executed - job.burst).abs() > TIME_EPSILON {
                return Err(inconsistency(format!(
                    "job {} executed {} of a {} burst",
                    job.id, executed, job.burst
                )));
            }

            let completion = job.completion.ok_or_else(|| {
                inconsistency(format!("job {} never completed", job.id))
            })?;
            if completion < job.arrival + job.burst - TIME_EPSILON {
                return Err(inconsistency(format!(
                    "job {} completed at {} before arrival {} + burst {}",
                    job.id, completion, job.arrival, job.burst
                )));
            }
        }

        // Slices are recorded in dispatch order, so per-CPU intervals must be
        // non-overlapping when scanned in sequence.
        for cpu in 0..ctx.cpus.len() {
            let mut last_end = f64::NEG_INFINITY;
            for slice in slices.iter().filter(|s| s.cpu == cpu) {
                if slice.start < last_end - TIME_EPSILON {
                    return Err(inconsistency(format!(
                        "cpu {} slice starting at {} overlaps previous slice ending at {}",
                        cpu, slice.start, last_end
                    )));
                }
                last_end = slice.end;
            }
        }

        Ok(())
    }
}

fn inconsistency(msg: String) -> EngineError {
    EngineError::InternalInconsistency(msg)
}
