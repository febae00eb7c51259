use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, error, info, warn, Level};

use lby_reader::{existing_outputs, export, output_file_name, LbyReader, OutputFormat};

mod models;
mod utils;

use crate::models::config_model::ConverterConfig;
use crate::utils::conf_helper::{init_config, load_config};

#[derive(Parser, Debug)]
#[command(name = "lby-convert")]
#[command(about = "Convert pull-tester .LBY force logs to CSV or JSON", long_about = None)]
struct Cli {
    /// LBY files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write JSON instead of CSV
    #[arg(long)]
    json: bool,
    /// Replace earlier outputs for the same test
    #[arg(long)]
    force: bool,
    /// Show what would happen without writing files
    #[arg(long)]
    dry_run: bool,
    #[arg(short, long)]
    verbose: bool,
    /// Config file (default: $LBY_CONFIG, then lby.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line win over the config file.
    fn apply(&self, config: &mut ConverterConfig) {
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if self.json {
            config.format = OutputFormat::Json;
        }
        config.force |= self.force;
        config.dry_run |= self.dry_run;
        config.verbose |= self.verbose;
    }
}

enum Outcome {
    Written(PathBuf),
    Skipped(Vec<PathBuf>),
    DryRun(PathBuf),
}

fn process_file(path: &Path, config: &ConverterConfig) -> lby_reader::Result<Outcome> {
    let reader = LbyReader::open_with(path, &config.detector)?;
    let series = reader.series();

    info!(
        "{}: {} samples, captured {}, peak {:.3} kN",
        path.display(),
        series.len(),
        series.anchor,
        series.peak_force()
    );
    debug!("  Header strings: {:?}", reader.header_strings());

    let existing = existing_outputs(&config.output_dir, path, config.format)?;
    if !existing.is_empty() && !config.force {
        return Ok(Outcome::Skipped(existing));
    }
    if config.dry_run {
        let target = config
            .output_dir
            .join(output_file_name(&series.anchor, path, config.format));
        return Ok(Outcome::DryRun(target));
    }

    for old in &existing {
        fs::remove_file(old)?;
        info!("  Removed existing {}", old.display());
    }

    let written = export(series, path, &config.output_dir, config.format)?;
    Ok(Outcome::Written(written))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).await?;
    cli.apply(&mut config);
    let config = init_config(config)?;

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    if config.dry_run {
        info!("DRY RUN MODE - no files will be created");
    } else {
        tokio::fs::create_dir_all(&config.output_dir).await?;
    }

    // Files share nothing, so each one gets its own blocking task.
    let tasks: Vec<_> = cli
        .files
        .into_iter()
        .map(|path| {
            let handle = tokio::task::spawn_blocking({
                let path = path.clone();
                move || process_file(&path, config)
            });
            (path, handle)
        })
        .collect();

    let (mut processed, mut skipped, mut errors) = (0usize, 0usize, 0usize);

    for (path, handle) in tasks {
        match handle.await {
            Ok(Ok(Outcome::Written(out))) => {
                info!("  -> {}", out.display());
                processed += 1;
            }
            Ok(Ok(Outcome::DryRun(out))) => {
                info!("  would write {}", out.display());
                processed += 1;
            }
            Ok(Ok(Outcome::Skipped(existing))) => {
                let names: Vec<String> = existing.iter().map(|p| p.display().to_string()).collect();
                info!(
                    "Skipping {}: {} already exist (use --force to overwrite)",
                    path.display(),
                    names.join(", ")
                );
                skipped += 1;
            }
            Ok(Err(e)) if e.is_format_error() => {
                warn!("{}: not a readable force log: {}", path.display(), e);
                errors += 1;
            }
            Ok(Err(e)) => {
                error!("Error processing {}: {}", path.display(), e);
                errors += 1;
            }
            Err(e) => {
                error!("Task for {} failed: {}", path.display(), e);
                errors += 1;
            }
        }
    }

    info!(
        "Processing complete: {} processed, {} skipped, {} errors",
        processed, skipped, errors
    );

    Ok(())
}
