//! Generation constants and runtime configuration defaults

// Tile synthesis
/// Independent snippet expansions tried per generated tile
pub const EXPANSION_ATTEMPTS: usize = 3;
/// Re-rolls shared across all attempts when an expansion clashes with its generator
pub const ANTISYNERGY_RETRIES: usize = 40;

// Prevents self-referencing snippet pools from expanding forever
/// Maximum placeholder substitutions in a single expansion
pub const MAX_SUBSTITUTIONS: usize = 1_000;
/// Maximum pools visited while deriving reachable categories
pub const MAX_DERIVATION_STEPS: usize = 10_000;

/// Score used when a named difficulty level cannot be found
pub const DEFAULT_LEVEL_SCORE: f64 = 1.0;

// Layout search
/// Random-restart trials for board layout
pub const LAYOUT_TRIALS: usize = 1_000;
/// Penalty for each antisynergy pair sharing a line
pub const ANTISYNERGY_PENALTY: i64 = 10;
/// Bonus for each synergy pair sharing a line
pub const SYNERGY_BONUS: i64 = 4;
/// Bonus for an adjacent layer pair following the difficulty gradient
pub const LAYER_GRADIENT_BONUS: i64 = 5;
/// Penalty for an adjacent layer pair against the difficulty gradient
pub const LAYER_GRADIENT_PENALTY: i64 = 2;

// Refine cycles default to REFINE_CYCLE_BUDGET / max(1, cells - REFINE_CELL_DISCOUNT) + REFINE_CYCLE_OFFSET
/// Cycle budget shared across the board's cells
pub const REFINE_CYCLE_BUDGET: usize = 2_000;
/// Cells that don't count against the cycle budget
pub const REFINE_CELL_DISCOUNT: usize = 10;
/// Cycles always granted on top of the budget
pub const REFINE_CYCLE_OFFSET: usize = 10;
/// Random tiles dropped when perturbing a rejected pool
pub const PERTURBATION_REMOVALS: usize = 2;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default board width in cells
pub const DEFAULT_WIDTH: usize = 5;
/// Default board height in cells
pub const DEFAULT_HEIGHT: usize = 5;
/// Default target mean difficulty
pub const DEFAULT_DIFFICULTY: f64 = 2.0;

// Safety limit to prevent runaway generation requests
/// Maximum allowed board dimension
pub const MAX_BOARD_DIMENSION: usize = 100;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_board";
/// Extension of exported boards
pub const OUTPUT_EXTENSION: &str = "json";
