//! CLI entry point for the overlapping-model wave function collapse tool

use clap::Parser;
use overlap_wfc::io::cli::{Cli, FileProcessor};

fn main() -> overlap_wfc::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
