use crate::core::state::{CpuId, JobId, Time};

/// One contiguous execution interval of a job on a CPU. The ordered slice list
/// is the authoritative trace of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub job: JobId,
    pub cpu: CpuId,
    pub start: Time,
    pub end: Time,
}

impl Slice {
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    JobAdmitted {
        job: JobId,
    },
    JobDispatched {
        job: JobId,
        cpu: CpuId,
        chunk: Time,
    },
    JobPreempted {
        job: JobId,
        cpu: CpuId,
    },
    JobCompleted {
        job: JobId,
        at: Time,
    },
    // CPU idle even after dispatch
    CpuIdle {
        cpu: CpuId,
    },
}
