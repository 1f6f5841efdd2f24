use super::driver::SimulationResult;
use std::fmt::Write;

/// Plain-text summary table, one row per job, suitable for a read-only text
/// surface. Jobs are labeled J1..Jn by their caller-assigned id.
pub fn render_report(result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<8} {:<6} {:<6} {:<6} {:<6} {:<10}",
        "#Job", "Arrival", "Burst", "Start", "End", "Wait", "Turnaround"
    );
    for job in &result.jobs {
        let _ = writeln!(
            out,
            "{:<5} {:<8} {:<6} {:<6.1} {:<6.1} {:<6.1} {:<10.1}",
            format!("J{}", job.id + 1),
            job.arrival,
            job.burst,
            job.first_start,
            job.completion,
            job.waiting,
            job.turnaround,
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Average Turnaround Time: {:.2}",
        result.avg_turnaround()
    );
    let _ = writeln!(out, "Average Waiting Time: {:.2}", result.avg_waiting());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::Slice;
    use crate::sim::job::JobReport;

    #[test]
    fn report_lists_jobs_and_averages() {
        let result = SimulationResult {
            slices: vec![Slice {
                job: 0,
                cpu: 0,
                start: 0.0,
                end: 3.0,
            }],
            jobs: vec![JobReport {
                id: 0,
                arrival: 0.0,
                burst: 3.0,
                first_start: 0.0,
                completion: 3.0,
                turnaround: 3.0,
                waiting: 0.0,
            }],
        };

        let text = render_report(&result);
        assert!(text.contains("#Job"));
        assert!(text.contains("J1"));
        assert!(text.contains("Average Turnaround Time: 3.00"));
        assert!(text.contains("Average Waiting Time: 0.00"));
    }
}
