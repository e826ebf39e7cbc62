use std::path::PathBuf;

use clap::{ArgAction, Parser};
use zalign_mol::{ElementFilter, MolResult};

/// Align two structures and export the result to a file.
#[derive(Parser, Debug)]
#[command(name = "zalign", version, about)]
pub struct Cli {
    /// Structure that is rotated and written out
    #[arg(short, long, value_name = "MOVABLE")]
    pub movable: PathBuf,

    /// Fixed structure to superpose onto
    #[arg(short, long, value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Output file; format is inferred from the extension
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Fit only on atoms with these element names (space or comma separated)
    #[arg(short, long, value_name = "ELEM", num_args = 1..)]
    pub filter: Vec<String>,

    /// Do not print the RMSD report
    #[arg(short, long)]
    pub quiet: bool,

    /// Title line of the output file
    #[arg(short, long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Run read, align and write N times and report the mean wall time
    #[arg(
        short = 'n',
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub repeat: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Element filter named on the command line, if any
    pub fn element_filter(&self) -> MolResult<Option<ElementFilter>> {
        if self.filter.is_empty() {
            return Ok(None);
        }
        self.filter.join(" ").parse().map(Some)
    }

    /// Default `env_logger` filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
