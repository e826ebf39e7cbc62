//! `zalign`: superpose a movable structure onto a reference and write it out.
//!
//! ```bash
//! zalign -m model.pdb -r crystal.pdb -o aligned.pdb -f CA
//! ```

use std::process::ExitCode;

mod cli;
mod run;

fn main() -> ExitCode {
    let cli = cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match run::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
