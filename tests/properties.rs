use chunksched::{simulate, ClusterConfig, JobSpec, Policy, RoundRobin, SimulationResult, Strf};
use proptest::prelude::*;

// Quarter-unit times are exact in binary floating point, so interval sums can
// be compared without tolerance.
fn arb_jobs() -> impl Strategy<Value = Vec<JobSpec>> {
    prop::collection::vec((0u32..=40, 1u32..=20), 1..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(id, (arrival, burst))| {
                JobSpec::new(id, f64::from(arrival) * 0.25, f64::from(burst) * 0.25)
            })
            .collect()
    })
}

fn arb_config() -> impl Strategy<Value = ClusterConfig> {
    (1usize..=4, 1u32..=8).prop_map(|(cpus, chunk)| ClusterConfig::new(cpus, f64::from(chunk) * 0.25))
}

fn check_invariants(config: ClusterConfig, jobs: &[JobSpec], result: &SimulationResult) {
    assert_eq!(result.jobs.len(), jobs.len());

    for spec in jobs {
        let report = result
            .jobs
            .iter()
            .find(|r| r.id == spec.id)
            .expect("every job gets a report");

        let executed: f64 = result
            .slices
            .iter()
            .filter(|s| s.job == spec.id)
            .map(|s| s.end - s.start)
            .sum();
        assert_eq!(executed, spec.burst, "job {} executed time", spec.id);

        assert!(
            report.completion >= spec.arrival + spec.burst,
            "job {} completed at {} before arrival {} + burst {}",
            spec.id,
            report.completion,
            spec.arrival,
            spec.burst
        );
        assert!(report.waiting >= 0.0);
        assert_eq!(report.turnaround, report.completion - spec.arrival);
    }

    // Slices are recorded in dispatch order, so a per-CPU scan sees
    // non-decreasing, non-overlapping intervals.
    for cpu in 0..config.cpus {
        let mut last_end = 0.0f64;
        for slice in result.slices.iter().filter(|s| s.cpu == cpu) {
            assert!(
                slice.start >= last_end,
                "cpu {cpu} slice at {} overlaps previous end {last_end}",
                slice.start
            );
            assert!(slice.end > slice.start);
            last_end = slice.end;
        }
    }
}

fn run_and_check<P: Policy>(config: ClusterConfig, jobs: Vec<JobSpec>) {
    let result = simulate::<P>(config, jobs.clone()).expect("valid input must simulate");
    check_invariants(config, &jobs, &result);

    let rerun = simulate::<P>(config, jobs).expect("valid input must simulate");
    assert_eq!(result, rerun, "identical inputs must reproduce the result");
}

proptest! {
    #[test]
    fn round_robin_upholds_trace_invariants(config in arb_config(), jobs in arb_jobs()) {
        run_and_check::<RoundRobin>(config, jobs);
    }

    #[test]
    fn strf_upholds_trace_invariants(config in arb_config(), jobs in arb_jobs()) {
        run_and_check::<Strf>(config, jobs);
    }
}
