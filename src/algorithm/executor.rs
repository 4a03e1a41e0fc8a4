use crate::{
    algorithm::{
        generation::{ExpansionLimits, generate_tile},
        layout::{LayoutSettings, populate},
    },
    analysis::statistics::{distance_to_target, mean_difficulty},
    content::{config::ConfigModel, difficulty::DifficultyTarget},
    io::configuration::{
        DEFAULT_DIFFICULTY, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_BOARD_DIMENSION,
        PERTURBATION_REMOVALS, REFINE_CELL_DISCOUNT, REFINE_CYCLE_BUDGET, REFINE_CYCLE_OFFSET,
    },
    io::error::{BingoError, Result, invalid_parameter},
    spatial::{grid::BingoBoard, tiles::BingoTile},
};
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Parameters of one board generation run
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    /// Board columns
    pub width: usize,
    /// Board rows
    pub height: usize,
    /// Desired mean tile difficulty
    pub target: DifficultyTarget,
    /// Refine cycles, `None` for the size-dependent default
    pub refine_cycles: Option<usize>,
    /// Refinement passes per cycle, `None` for one per cell
    pub passes_per_cycle: Option<usize>,
    /// Tile expansion bounds
    pub expansion: ExpansionLimits,
    /// Layout search parameters
    pub layout: LayoutSettings,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target: DifficultyTarget::Score(DEFAULT_DIFFICULTY),
            refine_cycles: None,
            passes_per_cycle: None,
            expansion: ExpansionLimits::default(),
            layout: LayoutSettings::default(),
        }
    }
}

impl GenerationSettings {
    /// Number of board cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Refine cycles after applying the default
    pub fn total_cycles(&self) -> usize {
        self.refine_cycles
            .unwrap_or_else(|| default_refine_cycles(self.cell_count()))
    }

    /// Check board dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or larger than [`MAX_BOARD_DIMENSION`]
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_BOARD_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_BOARD_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// Refine cycles used when none are requested
///
/// Small boards get many cheap cycles, large boards few expensive ones.
pub fn default_refine_cycles(cell_count: usize) -> usize {
    REFINE_CYCLE_BUDGET / cell_count.saturating_sub(REFINE_CELL_DISCOUNT).max(1)
        + REFINE_CYCLE_OFFSET
}

/// Board generation executor refining a tile pool toward a target difficulty
///
/// Each cycle runs several refinement passes. A pass fills the pool, trims the
/// tiles pulling the mean away from the target, refills and keeps the result
/// unless it moved further from the target. Rejected passes get one random
/// perturbation that is kept only on strict improvement. After the last cycle
/// the pool is laid out on the board.
pub struct BoardGenerator<'a, R: Rng> {
    config: &'a ConfigModel,
    settings: GenerationSettings,
    target_difficulty: f64,
    rng: R,
    pool: Vec<BingoTile>,
    cycle: usize,
    total_cycles: usize,
}

impl<'a> BoardGenerator<'a, StdRng> {
    /// Create a deterministic executor from a seed
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the configuration has no generators
    pub fn seeded(config: &'a ConfigModel, settings: GenerationSettings, seed: u64) -> Result<Self> {
        Self::new(config, settings, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> BoardGenerator<'a, R> {
    /// Create an executor drawing from `rng`
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the configuration has no generators
    pub fn new(config: &'a ConfigModel, settings: GenerationSettings, rng: R) -> Result<Self> {
        settings.validate()?;
        if config.generators().is_empty() {
            return Err(BingoError::NoGenerators);
        }

        let target_difficulty = settings.target.resolve(config.levels());
        let total_cycles = settings.total_cycles();
        info!(
            "Generating a {}x{} board at difficulty [{target_difficulty}] over [{total_cycles}] cycles",
            settings.width, settings.height
        );

        Ok(Self {
            config,
            pool: Vec::with_capacity(settings.cell_count()),
            settings,
            target_difficulty,
            rng,
            cycle: 0,
            total_cycles,
        })
    }

    /// Resolved target mean difficulty
    pub const fn target_difficulty(&self) -> f64 {
        self.target_difficulty
    }

    /// Cycles completed so far
    pub const fn cycle(&self) -> usize {
        self.cycle
    }

    /// Cycles the run will perform
    pub const fn total_cycles(&self) -> usize {
        self.total_cycles
    }

    /// Current tile pool
    pub fn pool(&self) -> &[BingoTile] {
        &self.pool
    }

    /// Run one refine cycle
    ///
    /// Returns `false` once every cycle has run.
    ///
    /// # Errors
    ///
    /// Returns an error if no tile can be generated
    pub fn execute_cycle(&mut self) -> Result<bool> {
        if self.cycle >= self.total_cycles {
            return Ok(false);
        }
        self.cycle += 1;

        let passes = self
            .settings
            .passes_per_cycle
            .unwrap_or_else(|| self.settings.cell_count());
        for _ in 0..passes {
            self.refine_pass()?;
        }
        Ok(true)
    }

    /// Run the remaining cycles and lay the pool out on a board
    ///
    /// # Errors
    ///
    /// Returns an error if no tile can be generated or the layout fails
    pub fn run(mut self) -> Result<BingoBoard> {
        while self.execute_cycle()? {}
        self.finish()
    }

    /// Lay the current pool out on a board, filling it first if needed
    ///
    /// # Errors
    ///
    /// Returns an error if no tile can be generated or the layout fails
    pub fn finish(mut self) -> Result<BingoBoard> {
        self.fill()?;

        let (width, height) = (self.settings.width, self.settings.height);
        let grid = populate(
            &self.pool,
            width,
            height,
            self.config,
            self.settings.layout,
            &mut self.rng,
        )?;

        let mut board = BingoBoard::new(width, height);
        board.populate(&grid)?;
        board.metadata = self.config.metadata().cloned();
        board.summarize(self.config);

        info!("Board difficulty is [{}]", board.difficulty);
        info!("Categories [{:?}]", board.category_counts);
        Ok(board)
    }

    fn refine_pass(&mut self) -> Result<()> {
        self.fill()?;
        let snapshot = self.pool.clone();
        let snapshot_distance = distance_to_target(&snapshot, self.target_difficulty);

        let trim_count = (self.settings.width + self.settings.height) / 2;
        trim_by_difficulty(&mut self.pool, trim_count, self.target_difficulty);
        self.fill()?;

        let distance = distance_to_target(&self.pool, self.target_difficulty);
        if distance <= snapshot_distance {
            if distance < snapshot_distance {
                debug!("Found better pool [{snapshot_distance}] -> [{distance}]");
            }
            return Ok(());
        }

        self.pool.clone_from(&snapshot);
        for _ in 0..PERTURBATION_REMOVALS {
            if self.pool.is_empty() {
                break;
            }
            let index = self.rng.random_range(0..self.pool.len());
            self.pool.remove(index);
        }
        self.fill()?;

        let distance = distance_to_target(&self.pool, self.target_difficulty);
        if distance < snapshot_distance {
            debug!("Perturbation found better pool [{snapshot_distance}] -> [{distance}]");
        } else {
            self.pool = snapshot;
        }
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        let destination_count = self.settings.cell_count();
        while self.pool.len() < destination_count {
            let tile = generate_tile(
                self.config,
                &self.pool,
                destination_count,
                self.target_difficulty,
                self.settings.expansion,
                &mut self.rng,
            )
            .ok_or(BingoError::NoGenerators)?;
            self.pool.push(tile);
        }
        Ok(())
    }
}

/// Remove `count` tiles, each time from whichever end of the difficulty order
/// pulls the mean toward `target`
pub fn trim_by_difficulty(pool: &mut Vec<BingoTile>, count: usize, target: f64) {
    pool.sort_by(|a, b| b.difficulty.total_cmp(&a.difficulty));
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        if mean_difficulty(pool) > target {
            pool.remove(0);
        } else {
            pool.pop();
        }
    }
}

/// Generate a board with a seeded random source
///
/// # Errors
///
/// Returns an error if the settings are invalid, the configuration has no
/// generators, or the layout fails
pub fn generate_board(
    config: &ConfigModel,
    settings: GenerationSettings,
    seed: u64,
) -> Result<BingoBoard> {
    BoardGenerator::seeded(config, settings, seed)?.run()
}
