//! Strategy execution.

use log::{debug, info, warn};
use rand::Rng;
use u_numflow::random::create_rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::{AnnealingConfig, HybridConfig, LocalSearchConfig, ScoringMode, Strategy};
use super::types::{SolveResult, SolveStats};
use crate::error::SolveError;
use crate::instance::Instance;
use crate::model::{Problem, Score};
use crate::placement;
use crate::scoring::{occupancy, score, FullEvaluator, IncrementalScore, MoveEvaluator};
use crate::search::{hill_climb, perturb, Annealer, Schedule};
use crate::tracker::SolutionTracker;

/// Randomized placement attempts made when the deterministic starting
/// placement fails.
const RANDOM_START_ATTEMPTS: usize = 32;

/// Runs a [`Strategy`] on a [`Problem`].
pub struct Solver;

impl Solver {
    /// Solves `problem` with `strategy`, drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// - [`SolveError::InvalidConfig`] if the strategy fails validation.
    /// - [`SolveError::HardConflict`] if a `MustNot` pair is forced into
    ///   one unit. No search is attempted.
    /// - [`SolveError::NoFeasiblePlacement`] if no feasible assignment was
    ///   ever produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_rooming::model::{Constraint, Problem};
    /// use u_rooming::solver::{HillClimbConfig, Solver, Strategy};
    ///
    /// let problem = Problem::with_uniform_capacity(
    ///     4,
    ///     2,
    ///     vec![Constraint::prefer(0, 2), Constraint::prefer(1, 3)],
    /// )
    /// .unwrap();
    /// let mut rng = u_numflow::random::create_rng(7);
    /// let result = Solver::run(&problem, &Strategy::HillClimb(HillClimbConfig::default()), &mut rng)
    ///     .unwrap();
    /// assert_eq!(result.best_score(), Some(2));
    /// ```
    pub fn run<R: Rng>(
        problem: &Problem,
        strategy: &Strategy,
        rng: &mut R,
    ) -> Result<SolveResult, SolveError> {
        strategy.validate().map_err(SolveError::InvalidConfig)?;
        if problem.n() == 0 {
            return Ok(SolveResult::default());
        }

        let inst = Instance::new(problem)?;
        debug!(
            "{} participants in {} units, {} rooms",
            problem.n(),
            inst.num_units(),
            inst.num_rooms()
        );
        let start = starting_point(&inst, rng);

        let mut run = Run {
            inst: &inst,
            tracker: SolutionTracker::new(),
            stats: SolveStats::default(),
        };
        if let Some(start) = &start {
            run.tracker.offer(start, score(problem, start));
        }

        match strategy {
            Strategy::HillClimb(config) => run.climb_start(start.as_deref(), config.scoring),
            Strategy::LocalSearch(config) => run.local_search(start.as_deref(), config, rng),
            Strategy::Annealing(config) => run.annealing(start.as_deref(), config, rng),
            Strategy::Hybrid(config) => run.hybrid(start.as_deref(), config, rng),
        }

        let Run { tracker, stats, .. } = run;
        let Some(best) = tracker.best_score() else {
            return Err(SolveError::NoFeasiblePlacement);
        };
        info!(
            "solve finished: best score {best}, {} distinct solutions, {} trials ({} failed placements)",
            tracker.len(),
            stats.trials,
            stats.failed_placements
        );
        Ok(SolveResult {
            solutions: tracker.into_solutions(),
            stats,
        })
    }
}

/// Deterministic placement, else a handful of randomized attempts.
fn starting_point<R: Rng>(inst: &Instance, rng: &mut R) -> Option<Vec<usize>> {
    let problem = inst.problem();
    if problem.total_capacity() < problem.n() {
        warn!(
            "{} participants do not fit in {} seats",
            problem.n(),
            problem.total_capacity()
        );
        return None;
    }
    if let Some(rooms) = placement::initial(inst) {
        return Some(rooms);
    }
    let found = (0..RANDOM_START_ATTEMPTS).find_map(|_| placement::random(inst, rng));
    if found.is_none() {
        warn!("no feasible starting placement after {RANDOM_START_ATTEMPTS} randomized attempts");
    }
    found
}

/// Climbs `rooms` to a local optimum with the chosen evaluator.
fn climb(inst: &Instance, rooms: Vec<usize>, mode: ScoringMode) -> (Vec<usize>, Score) {
    match mode {
        ScoringMode::Full => {
            let mut eval = FullEvaluator::new(inst, rooms);
            let s = hill_climb(inst, &mut eval);
            (eval.into_rooms(), s)
        }
        ScoringMode::Incremental => {
            let mut eval = IncrementalScore::new(inst, rooms);
            let s = hill_climb(inst, &mut eval);
            (eval.into_rooms(), s)
        }
    }
}

/// Draws one sub-seed per trial.
fn derive_seeds<R: Rng>(rng: &mut R, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.random::<u64>()).collect()
}

/// Runs `trial(index, seed)` for every seed, in parallel when enabled.
/// Output order follows `seeds`.
fn run_trials<T, F>(seeds: &[u64], parallel: bool, trial: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, u64) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if parallel {
        return seeds
            .par_iter()
            .enumerate()
            .map(|(i, &seed)| trial(i, seed))
            .collect();
    }
    let _ = parallel;
    seeds
        .iter()
        .enumerate()
        .map(|(i, &seed)| trial(i, seed))
        .collect()
}

/// What one trial hands back for merging.
struct TrialOutcome {
    tracker: SolutionTracker,
    placed: bool,
}

impl TrialOutcome {
    fn failed() -> Self {
        Self {
            tracker: SolutionTracker::new(),
            placed: false,
        }
    }

    fn single(rooms: &[usize], score: Score) -> Self {
        let mut tracker = SolutionTracker::new();
        tracker.offer(rooms, score);
        Self {
            tracker,
            placed: true,
        }
    }
}

/// Mutable state of one solve.
struct Run<'a, 'p> {
    inst: &'a Instance<'p>,
    tracker: SolutionTracker,
    stats: SolveStats,
}

impl Run<'_, '_> {
    fn absorb(&mut self, outcomes: Vec<TrialOutcome>) {
        for outcome in outcomes {
            self.stats.trials += 1;
            if !outcome.placed {
                self.stats.failed_placements += 1;
            }
            self.tracker.merge(outcome.tracker);
        }
    }

    fn climb_start(&mut self, start: Option<&[usize]>, mode: ScoringMode) {
        if let Some(start) = start {
            let (rooms, s) = climb(self.inst, start.to_vec(), mode);
            debug!("initial climb reached {s}");
            self.tracker.offer(&rooms, s);
        }
    }

    fn local_search<R: Rng>(
        &mut self,
        start: Option<&[usize]>,
        config: &LocalSearchConfig,
        rng: &mut R,
    ) {
        let inst = self.inst;
        let mode = config.scoring;
        self.climb_start(start, mode);

        let seeds = derive_seeds(rng, config.num_random);
        let outcomes = run_trials(&seeds, config.parallel, |_, seed| {
            let mut rng = create_rng(seed);
            match placement::random(inst, &mut rng) {
                Some(rooms) => {
                    let (rooms, s) = climb(inst, rooms, mode);
                    TrialOutcome::single(&rooms, s)
                }
                None => TrialOutcome::failed(),
            }
        });
        self.absorb(outcomes);
        debug!(
            "after {} random restarts: best {:?}",
            config.num_random,
            self.tracker.best_score()
        );

        let spread = config.perturb_max - config.perturb_min;
        let mut remaining = config.num_perturb;
        while remaining > 0 && !self.tracker.is_empty() {
            let batch = remaining.min(config.perturb_batch);
            remaining -= batch;

            let seeds = derive_seeds(rng, batch);
            let snapshot = &self.tracker;
            let outcomes = run_trials(&seeds, config.parallel, |_, seed| {
                let mut rng = create_rng(seed);
                let Some(source) = snapshot.pick(&mut rng) else {
                    return TrialOutcome::failed();
                };
                let count = config.perturb_min + rng.random_range(0..spread);
                let mut rooms = source.to_vec();
                let mut occ = occupancy(&rooms, inst.num_rooms());
                perturb(inst, &mut rooms, &mut occ, count, &mut rng);
                let (rooms, s) = climb(inst, rooms, mode);
                TrialOutcome::single(&rooms, s)
            });
            self.absorb(outcomes);
        }
        debug!(
            "after {} perturbations: best {:?}",
            config.num_perturb,
            self.tracker.best_score()
        );
    }

    fn annealing<R: Rng>(
        &mut self,
        start: Option<&[usize]>,
        config: &AnnealingConfig,
        rng: &mut R,
    ) {
        let inst = self.inst;
        let annealer = Annealer::new(Schedule {
            steps: config.steps,
            temp_high: config.temp_high,
            temp_low: config.temp_low,
        });

        let seeds = derive_seeds(rng, config.restarts);
        let outcomes = run_trials(&seeds, config.parallel, |restart, seed| {
            let mut rng = create_rng(seed);
            let rooms = if restart == 0 {
                start.map(<[usize]>::to_vec)
            } else {
                placement::random(inst, &mut rng)
            };
            let Some(rooms) = rooms else {
                return TrialOutcome::failed();
            };

            let mut tracker = SolutionTracker::new();
            let mut eval = IncrementalScore::new(inst, rooms);
            let stats = annealer.run(inst, &mut eval, &mut rng, Some(&mut tracker));
            debug!(
                "annealing restart {restart}: {} accepted of {} proposed, ended at {}",
                stats.accepted,
                stats.proposed,
                eval.score()
            );
            TrialOutcome {
                tracker,
                placed: true,
            }
        });
        self.absorb(outcomes);
    }

    fn hybrid<R: Rng>(
        &mut self,
        start: Option<&[usize]>,
        config: &HybridConfig,
        rng: &mut R,
    ) {
        let inst = self.inst;
        self.climb_start(start, ScoringMode::Incremental);
        let annealer = Annealer::new(Schedule {
            steps: config.steps,
            temp_high: config.temp_high,
            temp_low: config.temp_low,
        })
        .with_swap_fallback(true);

        let seeds = derive_seeds(rng, config.restarts);
        let climbed_start = self.tracker.first();
        let outcomes = run_trials(&seeds, config.parallel, |restart, seed| {
            let mut rng = create_rng(seed);
            let rooms = if restart == 0 {
                climbed_start.map(<[usize]>::to_vec)
            } else {
                placement::random(inst, &mut rng)
            };
            let Some(rooms) = rooms else {
                return TrialOutcome::failed();
            };

            let mut eval = IncrementalScore::new(inst, rooms);
            annealer.run(inst, &mut eval, &mut rng, None);
            let s = hill_climb(inst, &mut eval);
            debug!("hybrid restart {restart} climbed to {s}");
            TrialOutcome::single(eval.rooms(), s)
        });
        self.absorb(outcomes);
    }
}
