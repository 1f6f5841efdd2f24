use crate::core::state::Time;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobSpec {
    /// Caller-assigned identity; ties among equal arrivals break by this.
    pub id: usize,
    pub arrival: Time,
    pub burst: Time,
}

impl JobSpec {
    pub fn new(id: usize, arrival: Time, burst: Time) -> Self {
        Self { id, arrival, burst }
    }
}

/// Per-job outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobReport {
    pub id: usize,
    pub arrival: Time,
    pub burst: Time,
    /// First time the job occupied a CPU.
    pub first_start: Time,
    pub completion: Time,
    /// completion - arrival
    pub turnaround: Time,
    /// turnaround - burst
    pub waiting: Time,
}
