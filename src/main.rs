use chunksched::{render_report, simulate, ClusterConfig, EngineError, JobSpec, RoundRobin, Strf};
use clap::{Parser, ValueEnum};
use rand::prelude::*;

/// Fractional burst lengths drawn for generated workloads.
const BURST_CHOICES: [f64; 8] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.5, 5.0];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyKind {
    /// Quantum-based round robin, FIFO ready queue
    RoundRobin,
    /// Shortest remaining time first over chunk boundaries
    Strf,
}

#[derive(Parser, Debug)]
#[command(
    name = "chunksched",
    about = "Simulate chunked preemptive scheduling of jobs on a multi-CPU cluster"
)]
struct Args {
    /// Number of identical CPUs
    #[arg(long, default_value_t = 2)]
    cpus: usize,

    /// Chunk unit (quantum) by which bursts are subdivided
    #[arg(long, default_value_t = 1.0)]
    chunk: f64,

    #[arg(long, value_enum, default_value_t = PolicyKind::RoundRobin)]
    policy: PolicyKind,

    /// Job given as arrival:burst, repeatable
    #[arg(long = "job", value_parser = parse_job)]
    jobs: Vec<(f64, f64)>,

    /// Generate N random jobs instead of listing them
    #[arg(long, conflicts_with = "jobs")]
    random: Option<usize>,

    /// Seed for --random workloads
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn parse_job(s: &str) -> Result<(f64, f64), String> {
    let (arrival, burst) = s
        .split_once(':')
        .ok_or_else(|| format!("expected arrival:burst, got {s:?}"))?;
    let arrival = arrival
        .parse::<f64>()
        .map_err(|e| format!("bad arrival {arrival:?}: {e}"))?;
    let burst = burst
        .parse::<f64>()
        .map_err(|e| format!("bad burst {burst:?}: {e}"))?;
    Ok((arrival, burst))
}

fn random_jobs(count: usize, seed: u64) -> Vec<JobSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|id| {
            let arrival = rng.random_range(1..=10) as f64;
            let burst = *BURST_CHOICES.choose(&mut rng).unwrap();
            JobSpec::new(id, arrival, burst)
        })
        .collect()
}

/// Demo workload: three jobs with staggered arrivals, burst 2.
fn default_jobs() -> Vec<JobSpec> {
    (0..3)
        .map(|id| JobSpec::new(id, (id + 1) as f64, 2.0))
        .collect()
}

fn run(args: &Args) -> Result<(), EngineError> {
    let jobs = if let Some(count) = args.random {
        random_jobs(count, args.seed)
    } else if args.jobs.is_empty() {
        default_jobs()
    } else {
        args.jobs
            .iter()
            .enumerate()
            .map(|(id, &(arrival, burst))| JobSpec::new(id, arrival, burst))
            .collect()
    };

    let config = ClusterConfig::new(args.cpus, args.chunk);
    let result = match args.policy {
        PolicyKind::RoundRobin => simulate::<RoundRobin>(config, jobs)?,
        PolicyKind::Strf => simulate::<Strf>(config, jobs)?,
    };

    print!("{}", render_report(&result));
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
