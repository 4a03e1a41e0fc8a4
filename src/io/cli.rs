//! Command-line interface for generating boards from a content configuration

use crate::algorithm::executor::{BoardGenerator, GenerationSettings};
use crate::algorithm::layout::{LayerGradient, LayoutSettings};
use crate::content::config::ConfigModel;
use crate::content::difficulty::DifficultyTarget;
use crate::io::configuration::{
    DEFAULT_DIFFICULTY, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH, LAYOUT_TRIALS,
    OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{BingoError, Result, invalid_parameter};
use crate::io::loader::load_config;
use crate::io::progress::ProgressManager;
use crate::io::serialization::write_board;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bingogen")]
#[command(
    author,
    version,
    about = "Generate bingo boards from a YAML content configuration"
)]
/// Command-line arguments for the board generator
// Independent on/off switches for output and gradient direction
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// YAML content configuration
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Board width in cells
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Board height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Target mean difficulty score
    #[arg(long, conflicts_with_all = ["level", "level_name"])]
    pub score: Option<f64>,

    /// Target difficulty level, 1-based
    #[arg(long, conflicts_with = "level_name")]
    pub level: Option<usize>,

    /// Target difficulty level by name
    #[arg(long)]
    pub level_name: Option<String>,

    /// Random seed; board `i` of a batch uses `seed + i`
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Refine cycles, defaults to a value based on the board size
    #[arg(short, long)]
    pub cycles: Option<usize>,

    /// Layout trials per board
    #[arg(short, long, default_value_t = LAYOUT_TRIALS)]
    pub trials: usize,

    /// Number of boards to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Output directory, defaults to the configuration's directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Place harder tiles towards the center instead of the edges
    #[arg(long)]
    pub inward: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print each board as text
    #[arg(short, long)]
    pub print: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Difficulty target selected by the flags
    pub fn target(&self) -> DifficultyTarget {
        if let Some(score) = self.score {
            DifficultyTarget::Score(score)
        } else if let Some(level) = self.level {
            DifficultyTarget::Level(level)
        } else if let Some(name) = &self.level_name {
            DifficultyTarget::Named(name.clone())
        } else {
            DifficultyTarget::Score(DEFAULT_DIFFICULTY)
        }
    }

    /// Generation settings selected by the flags
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            width: self.width,
            height: self.height,
            target: self.target(),
            refine_cycles: self.cycles,
            layout: LayoutSettings {
                trials: self.trials,
                gradient: if self.inward {
                    LayerGradient::InwardIncreasing
                } else {
                    LayerGradient::OutwardIncreasing
                },
            },
            ..GenerationSettings::default()
        }
    }

    /// File the board with batch index `index` is written to
    pub fn output_path(&self, index: usize) -> PathBuf {
        let stem = self.config.file_stem().unwrap_or_default().to_string_lossy();
        let name = if self.count > 1 {
            format!("{stem}{OUTPUT_SUFFIX}_{index}.{OUTPUT_EXTENSION}")
        } else {
            format!("{stem}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}")
        };
        self.output_directory().join(name)
    }

    fn output_directory(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            self.config
                .parent()
                .map_or_else(PathBuf::new, Path::to_path_buf)
        })
    }
}

/// Generates and writes a batch of boards with progress tracking
pub struct BoardProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl BoardProcessor {
    /// Create a processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load the configuration and generate every requested board
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded, the arguments
    /// are invalid, or a board cannot be generated or written
    pub fn process(&mut self) -> Result<()> {
        if self.cli.count == 0 {
            return Err(invalid_parameter(
                "count",
                &self.cli.count,
                &"at least one board must be requested",
            ));
        }

        let config = load_config(&self.cli.config)?;

        let directory = self.cli.output_directory();
        if !directory.as_os_str().is_empty() {
            std::fs::create_dir_all(&directory).map_err(|source| BingoError::FileSystem {
                path: directory.clone(),
                operation: "create output directory",
                source,
            })?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        for index in 0..self.cli.count {
            self.process_board(&config, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    // Printing the board is the point of --print
    #[allow(clippy::print_stdout)]
    fn process_board(&mut self, config: &ConfigModel, index: usize) -> Result<()> {
        let seed = self.cli.seed.wrapping_add(index as u64);
        let output_path = self.cli.output_path(index);
        let mut generator = BoardGenerator::seeded(config, self.cli.settings(), seed)?;

        if let Some(ref mut pm) = self.progress_manager {
            let label = output_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            pm.start_board(index, &label, generator.total_cycles());
        }

        while generator.execute_cycle()? {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_cycle(index, generator.cycle());
            }
        }

        let board = generator.finish()?;
        write_board(&board, config, &output_path)?;
        info!("Wrote board to {}", output_path.display());

        if self.cli.print {
            print!("{board}");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_board(index, board.difficulty);
        }

        Ok(())
    }
}
