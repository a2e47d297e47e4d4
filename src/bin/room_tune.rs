//! Parameter tuning for the local search strategy.
//!
//! Reads a room problem from JSON, solves it repeatedly for every
//! combination of restart and perturbation counts, and reports how stable
//! the results are across seeds.
//!
//! ```text
//! room-tune trip.json --runs 20 --random 50,100 --perturb 750,1500
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, warn};
use serde::Deserialize;
use u_rooming::model::{Constraint, Problem, RoomGroup, Score};
use u_rooming::solver::{LocalSearchConfig, ScoringMode, Solver, Strategy};
use u_rooming::tracker::PartitionKey;

#[derive(Parser, Debug)]
#[command(name = "room-tune")]
#[command(about = "Measure local search quality and stability across seeds", long_about = None)]
struct Args {
    /// Problem JSON file
    input: String,

    /// Solver runs per parameter set
    #[arg(long, default_value_t = 20)]
    runs: usize,

    /// Comma-separated randomized restart counts
    #[arg(long, value_delimiter = ',', default_value = "100")]
    random: Vec<usize>,

    /// Comma-separated perturbation counts
    #[arg(long, value_delimiter = ',', default_value = "1500")]
    perturb: Vec<usize>,

    /// Fewest units moved per perturbation
    #[arg(long, default_value_t = 3)]
    pmin: usize,

    /// Most units moved per perturbation (exclusive)
    #[arg(long, default_value_t = 8)]
    pmax: usize,

    /// Perturbations sharing one tracker snapshot
    #[arg(long, default_value_t = 1)]
    batch: usize,

    /// Price moves by full rescoring instead of incrementally
    #[arg(long)]
    full: bool,

    /// Run trials on the rayon pool (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

#[derive(Debug, Deserialize)]
struct TripInput {
    /// Participant count; defaults to the length of `participants`.
    #[serde(default)]
    n: Option<usize>,
    #[serde(default)]
    participants: Vec<serde_json::Value>,
    room_groups: Vec<RoomGroup>,
    #[serde(default = "default_prefer_not_multiple")]
    prefer_not_multiple: Score,
    #[serde(default)]
    no_prefer_cost: Score,
    #[serde(default)]
    constraints: Vec<Constraint>,
}

fn default_prefer_not_multiple() -> Score {
    1
}

impl TripInput {
    fn into_problem(self) -> Result<Problem, Box<dyn Error>> {
        let n = self.n.unwrap_or(self.participants.len());
        let problem = Problem::with_room_groups(n, &self.room_groups, self.constraints)?
            .with_weights(self.prefer_not_multiple, self.no_prefer_cost)?;
        Ok(problem)
    }
}

struct RunResult {
    score: Score,
    keys: Vec<PartitionKey>,
    elapsed: Duration,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .map_err(|e| format!("failed to read {}: {e}", args.input))?;
    let trip: TripInput = serde_json::from_str(&text)?;
    let problem = trip.into_problem()?;

    println!(
        "Participants: {}, Room sizes: {:?}, Constraints: {}",
        problem.n(),
        problem.capacities(),
        problem.constraints().len()
    );
    println!(
        "Prefer Not multiple: {}, No Prefer cost: {}",
        problem.prefer_not_multiplier(),
        problem.no_prefer_cost()
    );
    println!("Runs per config: {}\n", args.runs);

    let scoring = if args.full {
        ScoringMode::Full
    } else {
        ScoringMode::Incremental
    };

    for &num_random in &args.random {
        for &num_perturb in &args.perturb {
            let config = LocalSearchConfig::default()
                .with_num_random(num_random)
                .with_num_perturb(num_perturb)
                .with_perturb_range(args.pmin, args.pmax)
                .with_perturb_batch(args.batch)
                .with_scoring(scoring)
                .with_parallel(args.parallel);
            let strategy = Strategy::LocalSearch(config);

            let mut results = Vec::with_capacity(args.runs);
            for run in 0..args.runs {
                let mut rng = u_numflow::random::create_rng(run as u64 * 31337);
                let started = Instant::now();
                let solved = Solver::run(&problem, &strategy, &mut rng)?;
                let elapsed = started.elapsed();
                let Some(score) = solved.best_score() else {
                    warn!("run {run} returned no solutions");
                    continue;
                };
                info!("run {run}: score {score} in {elapsed:?}");
                results.push(RunResult {
                    score,
                    keys: solved
                        .solutions
                        .iter()
                        .map(|s| PartitionKey::of(&s.assignment))
                        .collect(),
                    elapsed,
                });
            }

            let label = format!(
                "random={num_random} perturb={num_perturb} pmin={} pmax={}",
                args.pmin, args.pmax
            );
            print_stats(&label, &results, args.runs);
        }
    }
    Ok(())
}

fn print_stats(label: &str, results: &[RunResult], runs: usize) {
    let runs = runs.max(1);
    let mut scores: BTreeMap<Score, usize> = BTreeMap::new();
    let mut seen: BTreeMap<&PartitionKey, usize> = BTreeMap::new();
    let mut total_time = Duration::ZERO;
    let mut total_solutions = 0;

    for r in results {
        total_time += r.elapsed;
        *scores.entry(r.score).or_default() += 1;
        total_solutions += r.keys.len();
        for key in &r.keys {
            *seen.entry(key).or_default() += 1;
        }
    }

    println!("--- {label} ---");
    println!("  avg time: {:?}", total_time / runs as u32);
    println!("  score distribution:");
    for (score, count) in scores.iter().rev() {
        println!(
            "    score {score}: {count}/{runs} runs ({:.0}%)",
            *count as f64 / runs as f64 * 100.0
        );
    }
    println!("  unique solutions seen: {}", seen.len());
    println!(
        "  avg solutions per run: {:.1}",
        total_solutions as f64 / runs as f64
    );

    let mut frequencies: Vec<usize> = seen.values().copied().collect();
    frequencies.sort_unstable_by(|a, b| b.cmp(a));
    let stable = frequencies.iter().filter(|&&c| c == runs).count();
    println!("  solutions found in all runs: {stable}");
    if !frequencies.is_empty() {
        let top: Vec<String> = frequencies
            .iter()
            .take(5)
            .map(|c| format!("{c}/{runs}"))
            .collect();
        println!("  top {} solution frequencies: {}", top.len(), top.join(", "));
    }
    println!();
}
