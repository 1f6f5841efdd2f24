use super::job::{JobReport, JobSpec};
use crate::{
    core::{
        driver::Engine,
        event::{EngineEvent, Slice},
        state::{JobId, Time},
    },
    error::EngineError,
    scheduler::Policy,
};
use average::Estimate;
use log::debug;

/// Cluster capacity handed to a run: identical CPUs plus the chunk unit
/// (quantum) by which bursts are subdivided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    pub cpus: usize,
    pub chunk_unit: Time,
}

impl ClusterConfig {
    pub fn new(cpus: usize, chunk_unit: Time) -> Self {
        Self { cpus, chunk_unit }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.cpus < 1 {
            return Err(EngineError::InvalidConfiguration(
                "CPU count must be at least 1".into(),
            ));
        }
        // `!(x > 0.0)` also rejects NaN
        if !(self.chunk_unit > 0.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "chunk unit must be positive, got {}",
                self.chunk_unit
            )));
        }
        Ok(())
    }
}

/// Outcome of a finished run: the chronologically ordered execution trace plus
/// per-job statistics. Slices carry caller-assigned job ids.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub slices: Vec<Slice>,
    pub jobs: Vec<JobReport>,
}

impl SimulationResult {
    pub fn avg_turnaround(&self) -> f64 {
        self.jobs
            .iter()
            .map(|j| j.turnaround)
            .collect::<average::Mean>()
            .estimate()
    }

    pub fn avg_waiting(&self) -> f64 {
        self.jobs
            .iter()
            .map(|j| j.waiting)
            .collect::<average::Mean>()
            .estimate()
    }

    /// Latest completion across all jobs.
    pub fn makespan(&self) -> Time {
        self.jobs
            .iter()
            .map(|j| j.completion)
            .fold(0.0, Time::max)
    }
}

/// One simulation run: feeds a fixed job set into the engine as the clock
/// passes each arrival and drives it to quiescence. Consumes itself on `run`;
/// nothing is shared across invocations.
pub struct Sim<P: Policy> {
    engine: Engine<P>,
    /// Sorted by (arrival, id); the engine admits index i as core job id i.
    specs: Vec<JobSpec>,
    cursor: usize,
}

impl<P: Policy> Sim<P> {
    pub fn new(config: ClusterConfig, mut jobs: Vec<JobSpec>) -> Result<Self, EngineError> {
        config.validate()?;
        if jobs.is_empty() {
            return Err(EngineError::InapplicableInput(
                "at least one job is required".into(),
            ));
        }
        for job in &jobs {
            if !(job.burst > 0.0) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "job {} burst must be positive, got {}",
                    job.id, job.burst
                )));
            }
            if !(job.arrival >= 0.0) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "job {} arrival must be non-negative, got {}",
                    job.id, job.arrival
                )));
            }
        }

        jobs.sort_by(|a, b| {
            a.arrival
                .total_cmp(&b.arrival)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(Self {
            engine: Engine::new(config.cpus, config.chunk_unit),
            specs: jobs,
            cursor: 0,
        })
    }

    pub fn run(mut self) -> Result<SimulationResult, EngineError> {
        let mut events = Vec::new();
        let mut preempted: Vec<JobId> = Vec::new();

        loop {
            self.admit_arrivals(&mut events);
            // Same-instant arrivals queue ahead of jobs preempted now
            self.engine.requeue_preempted(&preempted);
            preempted.clear();

            self.engine.dispatch_idle(&mut events);
            self.engine.check_invariants()?;
            self.log_events(&mut events);

            if self.all_done() {
                break;
            }

            let next = self.next_event_time().ok_or_else(|| {
                EngineError::InternalInconsistency(
                    "simulation stalled with jobs outstanding and no pending event".into(),
                )
            })?;
            preempted = self.engine.advance_to(next, &mut events);
        }

        self.engine.audit_trace()?;
        self.build_result()
    }

    fn admit_arrivals(&mut self, events: &mut Vec<EngineEvent>) {
        let now = self.engine.now();
        // Contiguous, since specs are sorted by arrival
        while let Some(spec) = self.specs.get(self.cursor) {
            if spec.arrival > now {
                break;
            }
            self.engine.admit(spec.arrival, spec.burst, events);
            self.cursor += 1;
        }
    }

    fn all_done(&self) -> bool {
        self.cursor == self.specs.len() && self.engine.ctx.all_completed()
    }

    /// Earliest upcoming event: a busy CPU finishing its chunk or the next
    /// arrival, whichever comes first.
    fn next_event_time(&self) -> Option<Time> {
        let next_arrival = self.specs.get(self.cursor).map(|s| s.arrival);
        let next_cpu = self.engine.ctx.next_cpu_event();
        match (next_arrival, next_cpu) {
            (Some(a), Some(c)) => Some(a.min(c)),
            (Some(a), None) => Some(a),
            (None, Some(c)) => Some(c),
            (None, None) => None,
        }
    }

    fn log_events(&self, events: &mut Vec<EngineEvent>) {
        if log::log_enabled!(log::Level::Debug) {
            for event in events.iter() {
                debug!("t={} {:?}", self.engine.now(), event);
            }
        }
        events.clear();
    }

    fn build_result(self) -> Result<SimulationResult, EngineError> {
        let mut jobs = Vec::with_capacity(self.specs.len());
        for (core_id, spec) in self.specs.iter().enumerate() {
            let ctl = self.engine.ctx.job(core_id);
            let completion = ctl.completion.ok_or_else(|| {
                EngineError::InternalInconsistency(format!(
                    "job {} finished the run without a completion time",
                    spec.id
                ))
            })?;
            let first_start = ctl.first_start.ok_or_else(|| {
                EngineError::InternalInconsistency(format!(
                    "job {} completed without ever starting",
                    spec.id
                ))
            })?;

            let turnaround = completion - spec.arrival;
            jobs.push(JobReport {
                id: spec.id,
                arrival: spec.arrival,
                burst: spec.burst,
                first_start,
                completion,
                turnaround,
                waiting: turnaround - spec.burst,
            });
        }
        jobs.sort_by_key(|r| r.id);

        let slices = self
            .engine
            .slices()
            .iter()
            .map(|s| Slice {
                job: self.specs[s.job].id,
                ..*s
            })
            .collect();

        Ok(SimulationResult { slices, jobs })
    }
}

/// Typed entry point: validate, run, report. Pure apart from debug logging.
pub fn simulate<P: Policy>(
    config: ClusterConfig,
    jobs: Vec<JobSpec>,
) -> Result<SimulationResult, EngineError> {
    Sim::<P>::new(config, jobs)?.run()
}
