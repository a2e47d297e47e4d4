//! Strategy configuration.

/// How hill climbing prices candidate moves.
///
/// Both modes visit the same moves and pick the same winner; they differ
/// only in cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoringMode {
    /// Rescore the whole assignment for every candidate.
    Full,
    /// Reprice only constraints crossing the moved units.
    #[default]
    Incremental,
}

/// A single steepest-ascent climb from the initial placement.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillClimbConfig {
    /// How candidate moves are priced.
    pub scoring: ScoringMode,
}

impl HillClimbConfig {
    /// Sets the move pricing mode.
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }
}

/// Restarts plus iterated local search.
///
/// # Examples
///
/// ```
/// use u_rooming::solver::{LocalSearchConfig, ScoringMode};
///
/// let config = LocalSearchConfig::default()
///     .with_num_random(20)
///     .with_num_perturb(300)
///     .with_perturb_range(2, 6)
///     .with_scoring(ScoringMode::Full);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Randomized placements, each climbed to a local optimum.
    pub num_random: usize,

    /// Perturb-and-climb iterations. Dominates runtime.
    pub num_perturb: usize,

    /// Units moved per perturbation, drawn from `perturb_min..perturb_max`.
    pub perturb_min: usize,
    /// Exclusive upper bound of the perturbation size.
    pub perturb_max: usize,

    /// Perturbations drawing their source from the same tracker snapshot.
    /// `1` is a strictly sequential iterated local search; larger values
    /// trade that for parallelism.
    pub perturb_batch: usize,

    /// How candidate moves are priced during every climb.
    pub scoring: ScoringMode,

    /// Run trials on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            num_random: 50,
            num_perturb: 750,
            perturb_min: 3,
            perturb_max: 8,
            perturb_batch: 1,
            scoring: ScoringMode::default(),
            parallel: false,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the number of randomized restarts.
    pub fn with_num_random(mut self, n: usize) -> Self {
        self.num_random = n;
        self
    }

    /// Sets the number of perturb-and-climb iterations.
    pub fn with_num_perturb(mut self, n: usize) -> Self {
        self.num_perturb = n;
        self
    }

    /// Sets the half-open range of units moved per perturbation.
    pub fn with_perturb_range(mut self, min: usize, max: usize) -> Self {
        self.perturb_min = min;
        self.perturb_max = max;
        self
    }

    /// Sets how many perturbations share one tracker snapshot.
    pub fn with_perturb_batch(mut self, batch: usize) -> Self {
        self.perturb_batch = batch;
        self
    }

    /// Sets the move pricing mode.
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    /// Runs trials on the rayon pool when the `parallel` feature is on.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the perturbation range and batch size.
    pub fn validate(&self) -> Result<(), String> {
        if self.perturb_max <= self.perturb_min {
            return Err(format!(
                "perturb_max ({}) must exceed perturb_min ({})",
                self.perturb_max, self.perturb_min
            ));
        }
        if self.perturb_batch == 0 {
            return Err("perturb_batch must be at least 1".into());
        }
        Ok(())
    }
}

/// Independent simulated annealing restarts.
///
/// # Examples
///
/// ```
/// use u_rooming::solver::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_restarts(8)
///     .with_steps(2_000)
///     .with_temperatures(4.0, 0.05);
/// assert_eq!(config.restarts, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    /// Independent trajectories, each from its own starting placement.
    pub restarts: usize,
    /// Proposals per restart.
    pub steps: usize,
    /// Temperature at the first step.
    pub temp_high: f64,
    /// Temperature at the last step. Must be positive.
    pub temp_low: f64,
    /// Run restarts on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            restarts: 20,
            steps: 10_000,
            temp_high: 5.0,
            temp_low: 0.01,
            parallel: false,
        }
    }
}

impl AnnealingConfig {
    /// Sets the number of restarts.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Sets the proposals per restart.
    pub fn with_steps(mut self, n: usize) -> Self {
        self.steps = n;
        self
    }

    /// Sets the cooling bounds, `high` first.
    pub fn with_temperatures(mut self, high: f64, low: f64) -> Self {
        self.temp_high = high;
        self.temp_low = low;
        self
    }

    /// Runs restarts on the rayon pool when the `parallel` feature is on.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the temperatures are finite and `high > low > 0`.
    pub fn validate(&self) -> Result<(), String> {
        validate_temperatures(self.temp_high, self.temp_low)
    }
}

/// Annealing restarts, each polished by a hill climb.
///
/// Restart 0 continues from the climbed initial placement; the others
/// start from randomized placements.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridConfig {
    /// Annealing trajectories, each followed by a climb.
    pub restarts: usize,
    /// Proposals per restart.
    pub steps: usize,
    /// Temperature at the first step.
    pub temp_high: f64,
    /// Temperature at the last step. Must be positive.
    pub temp_low: f64,
    /// Run restarts on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            restarts: 50,
            steps: 5_000,
            temp_high: 10.0,
            temp_low: 0.1,
            parallel: false,
        }
    }
}

impl HybridConfig {
    /// Sets the number of restarts.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Sets the proposals per restart.
    pub fn with_steps(mut self, n: usize) -> Self {
        self.steps = n;
        self
    }

    /// Sets the cooling bounds, `high` first.
    pub fn with_temperatures(mut self, high: f64, low: f64) -> Self {
        self.temp_high = high;
        self.temp_low = low;
        self
    }

    /// Runs restarts on the rayon pool when the `parallel` feature is on.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the temperatures are finite and `high > low > 0`.
    pub fn validate(&self) -> Result<(), String> {
        validate_temperatures(self.temp_high, self.temp_low)
    }
}

fn validate_temperatures(high: f64, low: f64) -> Result<(), String> {
    if !(high.is_finite() && low.is_finite()) {
        return Err("temperatures must be finite".into());
    }
    if low <= 0.0 {
        return Err("temp_low must be positive".into());
    }
    if high <= low {
        return Err(format!("temp_high ({high}) must exceed temp_low ({low})"));
    }
    Ok(())
}

/// The search procedure run by [`Solver`](super::Solver).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// One climb from the initial placement.
    HillClimb(HillClimbConfig),
    /// Randomized restarts followed by perturbation.
    LocalSearch(LocalSearchConfig),
    /// Independent annealing restarts.
    Annealing(AnnealingConfig),
    /// Annealing restarts each polished by a climb.
    Hybrid(HybridConfig),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::LocalSearch(LocalSearchConfig::default())
    }
}

impl Strategy {
    /// Validates the wrapped configuration.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Strategy::HillClimb(_) => Ok(()),
            Strategy::LocalSearch(c) => c.validate(),
            Strategy::Annealing(c) => c.validate(),
            Strategy::Hybrid(c) => c.validate(),
        }
    }
}
