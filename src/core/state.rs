use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;

// Index into the job control table
pub type JobId = usize;
pub type CpuId = usize;

/// Continuous simulated time. Bursts and chunk units are fractional reals, so
/// the clock is not tick-based.
pub type Time = f64;

/// Tolerance for sums of fractional chunk durations. Individual remaining-time
/// decrements are exact (the final chunk equals the remaining burst), but
/// re-summing a slice list can pick up rounding for non-dyadic inputs.
pub const TIME_EPSILON: Time = 1e-9;

new_key_type! {
    pub struct QueueId;
}

/// Priority key for ranked run queues: smallest remaining burst first, then
/// earliest arrival, then lowest job id.
///
/// KeyedPriorityQueue is a max-heap, so Ord is flipped.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rank {
    pub remaining: Time,
    pub arrival: Time,
    pub job: JobId,
}

impl Eq for Rank {}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .remaining
            .total_cmp(&self.remaining)
            .then_with(|| other.arrival.total_cmp(&self.arrival))
            .then_with(|| other.job.cmp(&self.job))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Admitted to the cluster, waiting in some run queue.
    Ready,
    /// Currently occupying a CPU for one chunk.
    Running,
    Completed,
}

/// Per-job control record, owned by the cluster for the duration of one run.
#[derive(Debug)]
pub struct JobCtl {
    pub id: JobId,
    pub state: JobState,
    pub current_cpu: Option<CpuId>,
    pub arrival: Time,
    pub burst: Time,
    pub remaining: Time,
    pub first_start: Option<Time>,
    pub completion: Option<Time>,
}

#[derive(Debug)]
pub struct CpuState {
    pub id: CpuId,
    pub current: Option<JobId>,
    /// End of the chunk the current job is executing. Meaningless while idle.
    pub busy_until: Time,
}

#[derive(Debug)]
pub enum RunQueue {
    Fifo {
        jobs: VecDeque<JobId>,
    },
    Ranked {
        jobs: KeyedPriorityQueue<JobId, Rank>,
    },
}

impl RunQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            jobs: VecDeque::new(),
        }
    }

    pub fn new_ranked() -> Self {
        Self::Ranked {
            jobs: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, job_id: JobId) -> bool {
        match self {
            Self::Fifo { jobs } => jobs.contains(&job_id),
            Self::Ranked { jobs } => jobs.iter().any(|j| *j.0 == job_id),
        }
    }
}

/// Mutable cluster state threaded through the driver and the policy callbacks.
#[derive(Debug)]
pub struct ClusterCtx {
    pub now: Time,
    pub chunk_unit: Time,
    pub cpus: Vec<CpuState>,
    pub jobs: Vec<JobCtl>,
    pub queues: SlotMap<QueueId, RunQueue>,
    pub job_to_queue: FxHashMap<JobId, QueueId>,

    // Increment upon admission
    next_job_id: JobId,
}

impl ClusterCtx {
    pub fn new(num_cpus: usize, chunk_unit: Time) -> Self {
        Self {
            now: 0.0,
            chunk_unit,
            cpus: (0..num_cpus)
                .map(|id| CpuState {
                    id,
                    current: None,
                    busy_until: 0.0,
                })
                .collect(),
            jobs: Vec::new(),
            queues: SlotMap::with_key(),
            job_to_queue: FxHashMap::default(),
            next_job_id: 0,
        }
    }

    /// Admit a job to the cluster. Ids are assigned in admission order, so
    /// equal-arrival jobs keep their original input ordering.
    pub fn admit_job(&mut self, arrival: Time, burst: Time) -> JobId {
        let id = self.next_job_id;
        self.next_job_id += 1;

        let job = JobCtl {
            id,
            state: JobState::Ready,
            current_cpu: None,
            arrival,
            burst,
            remaining: burst,
            first_start: None,
            completion: None,
        };

        debug_assert_eq!(self.jobs.len(), id, "JobId must match table index");
        self.jobs.push(job);

        id
    }

    pub fn create_queue_fifo(&mut self) -> QueueId {
        self.queues.insert(RunQueue::new_fifo())
    }

    pub fn create_queue_ranked(&mut self) -> QueueId {
        self.queues.insert(RunQueue::new_ranked())
    }

    fn queue_push(&mut self, queue_id: QueueId, job_id: JobId, rank: Option<Rank>) {
        debug_assert!(
            !self.job_to_queue.contains_key(&job_id),
            "job {job_id} already present in some run queue"
        );

        let job = self.job(job_id);
        debug_assert_eq!(
            job.state,
            JobState::Ready,
            "job {job_id} must be Ready when enqueued"
        );

        let queue = self.queues.get_mut(queue_id).expect("unknown run queue");
        match queue {
            RunQueue::Fifo { jobs } => jobs.push_back(job_id),
            RunQueue::Ranked { jobs } => {
                jobs.push(
                    job_id,
                    rank.expect("attempted to push to a ranked queue with no rank"),
                );
            }
        }

        self.job_to_queue.insert(job_id, queue_id);
    }

    pub fn queue_push_back(&mut self, queue_id: QueueId, job_id: JobId) {
        self.queue_push(queue_id, job_id, None);
    }

    pub fn queue_push_ranked(&mut self, queue_id: QueueId, job_id: JobId, rank: Rank) {
        self.queue_push(queue_id, job_id, Some(rank));
    }

    pub fn queue_pop(&mut self, queue_id: QueueId) -> Option<JobId> {
        let queue = self.queues.get_mut(queue_id)?;
        let job = match queue {
            RunQueue::Fifo { jobs } => jobs.pop_front(),
            RunQueue::Ranked { jobs } => jobs.pop().map(|j| j.0),
        }?;

        let removed = self.job_to_queue.remove(&job);
        debug_assert!(removed.is_some(), "job {job} missing queue membership");

        Some(job)
    }

    pub fn job(&self, job_id: JobId) -> &JobCtl {
        &self.jobs[job_id]
    }

    pub fn job_mut(&mut self, job_id: JobId) -> &mut JobCtl {
        &mut self.jobs[job_id]
    }

    pub fn cpu_is_idle(&self, cpu: CpuId) -> bool {
        self.cpus[cpu].current.is_none()
    }

    pub fn all_completed(&self) -> bool {
        self.jobs.iter().all(|j| j.state == JobState::Completed)
    }

    /// Earliest chunk expiry among busy CPUs.
    pub fn next_cpu_event(&self) -> Option<Time> {
        self.cpus
            .iter()
            .filter(|cpu| cpu.current.is_some())
            .map(|cpu| cpu.busy_until)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn mark_ready(&mut self, job_id: JobId) {
        let job = self.job_mut(job_id);
        debug_assert_ne!(
            job.state,
            JobState::Completed,
            "completed job {job_id} cannot become ready"
        );
        job.state = JobState::Ready;
        job.current_cpu = None;
    }

    pub fn mark_completed(&mut self, job_id: JobId, completion: Time) {
        debug_assert!(
            !self.job_to_queue.contains_key(&job_id),
            "completing job {job_id} that is still enqueued"
        );

        let job = &mut self.jobs[job_id];
        debug_assert_eq!(
            job.state,
            JobState::Running,
            "job {job_id} must have been running before completion"
        );

        job.state = JobState::Completed;
        job.current_cpu = None;
        job.completion = Some(completion);
    }

    /// Claim `cpu` for `job_id` for one chunk ending at `busy_until`.
    pub fn set_running(&mut self, cpu: CpuId, job_id: JobId, busy_until: Time) {
        debug_assert!(
            !self.job_to_queue.contains_key(&job_id),
            "running job {job_id} must not be enqueued"
        );
        debug_assert!(
            self.cpus[cpu].current.is_none(),
            "CPU {cpu} already running a job"
        );

        self.cpus[cpu].current = Some(job_id);
        self.cpus[cpu].busy_until = busy_until;

        let now = self.now;
        let job = self.job_mut(job_id);
        job.state = JobState::Running;
        job.current_cpu = Some(cpu);
        if job.first_start.is_none() {
            job.first_start = Some(now);
        }
    }

    pub fn clear_cpu(&mut self, cpu: CpuId) {
        self.cpus[cpu].current = None;
    }
}
