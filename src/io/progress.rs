//! Progress display for generating one or many boards
//!
//! Each bar follows one board through its refine cycles and shows the final
//! difficulty once the board is written. Batches larger than the bar budget
//! get an extra batch bar, and only the most recently started boards stay on
//! screen.

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::debug;
use std::collections::VecDeque;
use std::sync::LazyLock;

static CYCLE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:24} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Boards: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

#[derive(Debug)]
struct BoardProgress {
    index: usize,
    label: String,
    cycle: usize,
    cycles: usize,
    difficulty: Option<f64>,
}

impl BoardProgress {
    fn message(&self) -> String {
        match self.difficulty {
            Some(difficulty) => format!("✓ difficulty {difficulty:.2}"),
            None => {
                let width = self.cycles.to_string().len();
                format!("cycle {:>width$}/{}", self.cycle, self.cycles)
            }
        }
    }

    fn draw(&self, bar: &ProgressBar) {
        bar.set_length(self.cycles as u64);
        bar.set_position(self.cycle as u64);
        bar.set_prefix(self.label.clone());
        bar.set_message(self.message());
    }
}

/// Coordinates progress bars across a batch of boards
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    board_bars: Vec<ProgressBar>,
    // Oldest first, at most one entry per bar
    recent: VecDeque<BoardProgress>,
    boards_seen: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager without any bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            board_bars: Vec::new(),
            recent: VecDeque::with_capacity(MAX_INDIVIDUAL_PROGRESS_BARS),
            boards_seen: 0,
        }
    }

    /// Create bars for a batch of `board_count` boards
    pub fn initialize(&mut self, board_count: usize) {
        if board_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(board_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..board_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(CYCLE_STYLE.clone());
            self.board_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Begin tracking board `index`, pushing the oldest board off screen when needed
    pub fn start_board(&mut self, index: usize, label: &str, cycles: usize) {
        self.boards_seen = self.boards_seen.max(index + 1);
        self.recent.retain(|board| board.index != index);
        self.recent.push_back(BoardProgress {
            index,
            label: label.to_string(),
            cycle: 0,
            cycles,
            difficulty: None,
        });
        while self.recent.len() > MAX_INDIVIDUAL_PROGRESS_BARS {
            self.recent.pop_front();
        }
        self.render();
    }

    /// Report the refine cycle a board has reached
    pub fn update_cycle(&mut self, index: usize, cycle: usize) {
        if let Some(board) = self.board_mut(index) {
            board.cycle = cycle.min(board.cycles);
            self.render();
        }
    }

    /// Mark a board as written with its final mean difficulty
    pub fn complete_board(&mut self, index: usize, difficulty: f64) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(board) = self.board_mut(index) {
            board.cycle = board.cycles;
            board.difficulty = Some(difficulty);
            self.render();
        }
    }

    /// Clear every bar
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All boards generated");
        }
        if let Err(error) = self.multi_progress.clear() {
            debug!("Could not clear progress bars: {error}");
        }
    }

    /// Number of boards seen so far, counting up to the highest started index
    pub const fn board_count(&self) -> usize {
        self.boards_seen
    }

    /// Labels of the boards currently on screen, oldest first
    pub fn visible_boards(&self) -> Vec<&str> {
        self.recent.iter().map(|board| board.label.as_str()).collect()
    }

    fn board_mut(&mut self, index: usize) -> Option<&mut BoardProgress> {
        self.recent.iter_mut().find(|board| board.index == index)
    }

    fn render(&self) {
        for (slot, bar) in self.board_bars.iter().enumerate() {
            match self.recent.get(slot) {
                Some(board) => board.draw(bar),
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}
