use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use zalign_algos::{align, AlignOptions, RmsdReport};
use zalign_io::{read_file, write_file_with, WriteOptions};

use crate::cli::Cli;

/// Read both structures, superpose, write the result. Repeated `--repeat`
/// times when timing.
pub fn run(cli: &Cli) -> Result<()> {
    let filter = cli.element_filter().context("Invalid element filter")?;
    if let Some(filter) = &filter {
        log::info!("Fitting on elements: {}", filter);
    }
    let options = AlignOptions {
        filter,
        report: !cli.quiet,
    };
    let write_options = match &cli.title {
        Some(title) => WriteOptions::new().with_title(title.clone()),
        None => WriteOptions::new(),
    };

    let runs = cli.repeat.unwrap_or(1);
    let mut elapsed = Duration::ZERO;
    let mut report = None;
    for i in 0..runs {
        let start = Instant::now();
        report = align_once(cli, &options, &write_options)?;
        elapsed += start.elapsed();
        log::debug!("Run {} of {} done", i + 1, runs);
    }

    if let Some(report) = report {
        println!("{}", report);
    }
    if cli.repeat.is_some() {
        println!(
            "Mean time: {:.6} s over {} runs",
            elapsed.as_secs_f64() / f64::from(runs),
            runs
        );
    }
    Ok(())
}

fn align_once(
    cli: &Cli,
    options: &AlignOptions,
    write_options: &WriteOptions,
) -> Result<Option<RmsdReport>> {
    let mut movable = read_file(&cli.movable)
        .with_context(|| format!("Failed to read movable structure {}", cli.movable.display()))?;
    let reference = read_file(&cli.reference).with_context(|| {
        format!(
            "Failed to read reference structure {}",
            cli.reference.display()
        )
    })?;

    let outcome = align(&mut movable, &reference, options).with_context(|| {
        format!(
            "Cannot align {} onto {}",
            cli.movable.display(),
            cli.reference.display()
        )
    })?;
    if !outcome.superposition.is_proper_rotation() {
        log::warn!("Fitted transform includes a reflection");
    }

    write_file_with(&cli.output, &movable, write_options)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    Ok(outcome.rmsd)
}
