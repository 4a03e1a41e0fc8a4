//! CLI entry point for bingo board generation

use bingogen::io::cli::{BoardProcessor, Cli};
use clap::Parser;

fn main() -> bingogen::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = BoardProcessor::new(cli);
    processor.process()
}
