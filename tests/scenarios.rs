use chunksched::{simulate, ClusterConfig, EngineError, JobSpec, RoundRobin, Strf};

fn job(id: usize, arrival: f64, burst: f64) -> JobSpec {
    JobSpec::new(id, arrival, burst)
}

#[test]
fn single_job_runs_uninterrupted_when_chunk_covers_burst() {
    let result = simulate::<RoundRobin>(ClusterConfig::new(1, 5.0), vec![job(0, 0.0, 3.0)]).unwrap();

    assert_eq!(result.slices.len(), 1);
    assert_eq!(result.slices[0].cpu, 0);
    assert_eq!(result.slices[0].start, 0.0);
    assert_eq!(result.slices[0].end, 3.0);

    let report = &result.jobs[0];
    assert_eq!(report.completion, 3.0);
    assert_eq!(report.turnaround, 3.0);
    assert_eq!(report.waiting, 0.0);
}

#[test]
fn round_robin_interleaves_equal_jobs_on_one_cpu() {
    let result = simulate::<RoundRobin>(
        ClusterConfig::new(1, 1.0),
        vec![job(0, 0.0, 2.0), job(1, 0.0, 2.0)],
    )
    .unwrap();

    let order: Vec<usize> = result.slices.iter().map(|s| s.job).collect();
    assert_eq!(order, vec![0, 1, 0, 1]);

    assert_eq!(result.jobs[0].completion, 3.0);
    assert_eq!(result.jobs[1].completion, 4.0);
    assert_eq!(result.jobs[0].waiting, 1.0);
    assert_eq!(result.jobs[1].waiting, 2.0);
    assert_eq!(result.avg_turnaround(), 3.5);
    assert_eq!(result.makespan(), 4.0);
}

#[test]
fn two_cpus_run_simultaneous_arrivals_in_parallel() {
    let result = simulate::<RoundRobin>(
        ClusterConfig::new(2, 5.0),
        vec![job(0, 0.0, 2.0), job(1, 0.0, 3.0)],
    )
    .unwrap();

    assert_eq!(result.slices.len(), 2);
    // Lowest-numbered idle CPU claims the queue head
    assert_eq!((result.slices[0].job, result.slices[0].cpu), (0, 0));
    assert_eq!((result.slices[1].job, result.slices[1].cpu), (1, 1));
    assert!(result.slices.iter().all(|s| s.start == 0.0));

    assert_eq!(result.jobs[0].completion, 2.0);
    assert_eq!(result.jobs[1].completion, 3.0);
    assert!(result.jobs.iter().all(|j| j.waiting == 0.0));
}

#[test]
fn idle_cluster_waits_for_first_arrival() {
    let result = simulate::<RoundRobin>(ClusterConfig::new(1, 2.0), vec![job(0, 2.0, 1.0)]).unwrap();

    assert_eq!(result.jobs[0].first_start, 2.0);
    assert_eq!(result.jobs[0].completion, 3.0);
    assert_eq!(result.jobs[0].waiting, 0.0);
}

#[test]
fn fractional_chunk_splits_burst_exactly() {
    let result = simulate::<RoundRobin>(ClusterConfig::new(1, 0.5), vec![job(0, 0.0, 1.5)]).unwrap();

    let starts: Vec<f64> = result.slices.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0.0, 0.5, 1.0]);
    assert_eq!(result.jobs[0].completion, 1.5);

    let executed: f64 = result.slices.iter().map(|s| s.end - s.start).sum();
    assert_eq!(executed, 1.5);
}

#[test]
fn round_robin_lets_new_arrival_in_before_preempted_job() {
    let result = simulate::<RoundRobin>(
        ClusterConfig::new(1, 1.0),
        vec![job(0, 0.0, 2.0), job(1, 1.0, 1.0)],
    )
    .unwrap();

    let order: Vec<usize> = result.slices.iter().map(|s| s.job).collect();
    assert_eq!(order, vec![0, 1, 0]);
    assert_eq!(result.jobs[1].completion, 2.0);
    assert_eq!(result.jobs[0].completion, 3.0);
}

#[test]
fn round_robin_fills_cpus_from_queue_head() {
    let result = simulate::<RoundRobin>(
        ClusterConfig::new(2, 1.0),
        vec![job(0, 0.0, 2.0), job(1, 0.0, 1.0), job(2, 0.0, 1.0)],
    )
    .unwrap();

    let placements: Vec<(usize, usize, f64)> = result
        .slices
        .iter()
        .map(|s| (s.job, s.cpu, s.start))
        .collect();
    assert_eq!(
        placements,
        vec![
            (0, 0, 0.0),
            (1, 1, 0.0),
            (2, 0, 1.0),
            (0, 1, 1.0),
        ]
    );
    assert_eq!(result.jobs[1].completion, 1.0);
    assert_eq!(result.jobs[0].completion, 2.0);
    assert_eq!(result.jobs[2].completion, 2.0);
}

#[test]
fn strf_prefers_the_job_closest_to_finishing() {
    let result = simulate::<Strf>(
        ClusterConfig::new(1, 1.0),
        vec![job(0, 0.0, 3.0), job(1, 1.0, 1.0)],
    )
    .unwrap();

    let order: Vec<usize> = result.slices.iter().map(|s| s.job).collect();
    assert_eq!(order, vec![0, 1, 0, 0]);
    assert_eq!(result.jobs[1].completion, 2.0);
    assert_eq!(result.jobs[0].completion, 4.0);
}

#[test]
fn strf_runs_a_started_job_to_completion_over_an_equal_peer() {
    // Diverges from round robin: after one chunk, job 0 has the shorter
    // remaining burst and keeps the CPU until it finishes.
    let result = simulate::<Strf>(
        ClusterConfig::new(1, 1.0),
        vec![job(0, 0.0, 2.0), job(1, 0.0, 2.0)],
    )
    .unwrap();

    let order: Vec<usize> = result.slices.iter().map(|s| s.job).collect();
    assert_eq!(order, vec![0, 0, 1, 1]);
    assert_eq!(result.jobs[0].completion, 2.0);
    assert_eq!(result.jobs[1].completion, 4.0);
}

#[test]
fn rejects_zero_cpus() {
    let err = simulate::<RoundRobin>(ClusterConfig::new(0, 1.0), vec![job(0, 0.0, 1.0)]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfiguration(_)));
}

#[test]
fn rejects_non_positive_chunk_unit() {
    for chunk in [0.0, -1.0, f64::NAN] {
        let err =
            simulate::<RoundRobin>(ClusterConfig::new(1, chunk), vec![job(0, 0.0, 1.0)]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }
}

#[test]
fn rejects_non_positive_burst() {
    let err = simulate::<RoundRobin>(ClusterConfig::new(1, 1.0), vec![job(0, 0.0, 0.0)]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfiguration(_)));
}

#[test]
fn rejects_negative_arrival() {
    let err = simulate::<RoundRobin>(ClusterConfig::new(1, 1.0), vec![job(0, -1.0, 1.0)]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfiguration(_)));
}

#[test]
fn rejects_empty_job_set() {
    let err = simulate::<RoundRobin>(ClusterConfig::new(1, 1.0), vec![]).unwrap_err();
    assert!(matches!(err, EngineError::InapplicableInput(_)));
}

#[test]
fn reruns_are_bit_identical() {
    let jobs = vec![
        job(0, 1.0, 2.5),
        job(1, 1.0, 1.5),
        job(2, 3.0, 4.5),
        job(3, 0.0, 3.5),
    ];
    let config = ClusterConfig::new(2, 1.5);

    let first = simulate::<RoundRobin>(config, jobs.clone()).unwrap();
    let second = simulate::<RoundRobin>(config, jobs.clone()).unwrap();
    assert_eq!(first, second);

    let first = simulate::<Strf>(config, jobs.clone()).unwrap();
    let second = simulate::<Strf>(config, jobs).unwrap();
    assert_eq!(first, second);
}
