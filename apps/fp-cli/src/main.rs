use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fp_app::{
    AppResult, RunOptions, RunProgressEvent, RunRequest, query, run_service, study_service,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fishpass")]
#[command(about = "FishPass CLI - upstream fish passage through restricted river networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate study file syntax and structure
    Validate {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// List main stem reaches (given, or derived from hydrologic units)
    MainStems {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// List the origin reaches a run would start from
    Origins {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// Run the passage model
    Run {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a study
    Runs {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export a run's result tables as CSV
    Export {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Only this origin's table
        #[arg(long, conflicts_with = "combined")]
        origin: Option<String>,
        /// Sum remaining percent per reach across all origins
        #[arg(long)]
        combined: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { study_path } => cmd_validate(&study_path),
        Commands::MainStems { study_path } => cmd_main_stems(&study_path),
        Commands::Origins { study_path } => cmd_origins(&study_path),
        Commands::Run {
            study_path,
            no_cache,
        } => cmd_run(&study_path, !no_cache),
        Commands::Runs { study_path } => cmd_runs(&study_path),
        Commands::ShowRun { study_path, run_id } => cmd_show_run(&study_path, &run_id),
        Commands::Export {
            study_path,
            run_id,
            origin,
            combined,
            output,
        } => cmd_export(
            &study_path,
            &run_id,
            origin.as_deref(),
            combined,
            output.as_deref(),
        ),
    }
}

fn cmd_validate(study_path: &Path) -> AppResult<()> {
    println!("Validating study: {}", study_path.display());
    let study = study_service::load_study(study_path)?;
    let compiled = study_service::compile_study(&study)?;
    let summary = study_service::summarize_study(&study, &compiled);

    println!("✓ Study is valid: {} (version {})", summary.name, summary.version);
    println!(
        "  Network: {} reaches, {} edges",
        summary.reach_count, summary.edge_count
    );
    if let Some(habitat) = summary.habitat_reaches {
        println!("  Habitat: {} reaches", habitat);
    }
    println!(
        "  Restrictions: {} on {} reaches",
        summary.restriction_count, summary.restricted_reaches
    );
    if summary.unit_count > 0 {
        println!("  Hydrologic units: {}", summary.unit_count);
    }
    println!("  Origins from: {:?}", summary.origin_source);
    println!("  Splitting: {}", summary.splitting);
    Ok(())
}

fn cmd_main_stems(study_path: &Path) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let compiled = study_service::compile_study(&study)?;
    let main_stems = study_service::resolve_main_stems(&study, &compiled)?;

    println!("Main stem reaches ({}):", main_stems.len());
    for reach in &main_stems {
        println!("  {}", reach);
    }
    Ok(())
}

fn cmd_origins(study_path: &Path) -> AppResult<()> {
    let study = study_service::load_study(study_path)?;
    let compiled = study_service::compile_study(&study)?;
    let origins = study_service::resolve_origins(&study, &compiled)?;

    println!("Origin reaches ({}):", origins.len());
    for reach in &origins {
        println!("  {}", reach);
    }
    Ok(())
}

fn cmd_run(study_path: &Path, use_cache: bool) -> AppResult<()> {
    println!("Running passage model for study: {}", study_path.display());

    let request = RunRequest {
        study_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Run completed: {}", response.run_id);
    }

    let summary = query::get_run_summary(&response.tables)?;
    println!("  Origins: {}", summary.origin_count);
    println!("  Records: {}", summary.record_count);
    println!("  Distinct reaches: {}", summary.distinct_reaches);
    println!("  Elapsed: {:.3}s", response.elapsed_s);

    Ok(())
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(100));
    let _ = io::stderr().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    eprint!("{}", line);
    let _ = io::stderr().flush();
}

fn cmd_runs(study_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(study_path)?;

    if runs.is_empty() {
        println!("No cached runs found for study: {}", study_path.display());
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} ({}, {} origins)",
                manifest.run_id, manifest.timestamp, manifest.origin_count
            );
        }
    }
    Ok(())
}

fn cmd_show_run(study_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, tables) = run_service::load_run(study_path, run_id)?;
    let summary = query::get_run_summary(&tables)?;

    println!("\nRun Summary:");
    println!("  Study: {}", manifest.study_name);
    println!("  Created: {}", manifest.timestamp);
    println!("  Model version: {}", manifest.model_version);
    println!(
        "  Pass rate: {}%  Cutoff: {}%",
        manifest.parameters.pass_rate, manifest.parameters.cutoff
    );
    println!("  Origins: {}", summary.origin_count);
    println!("  Records: {}", summary.record_count);
    println!("  Distinct reaches: {}", summary.distinct_reaches);

    println!("\nOrigins:");
    for table in &tables {
        let origin_pct = table.rows.first().map(|r| r.remaining_pct).unwrap_or(0.0);
        println!(
            "  {}  {:.2}% at origin, {} reaches",
            table.origin,
            origin_pct,
            table.len()
        );
    }

    Ok(())
}

fn cmd_export(
    study_path: &Path,
    run_id: &str,
    origin: Option<&str>,
    combined: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, tables) = run_service::load_run(study_path, run_id)?;

    let csv = match origin {
        Some(origin) => {
            let table = query::find_table(&tables, origin)?;
            query::tables_csv(std::slice::from_ref(table))?
        }
        None if combined => query::combined_csv(&tables)?,
        None => query::tables_csv(&tables)?,
    };

    if let Some(path) = output {
        std::fs::write(path, &csv)?;
        println!(
            "✓ Exported {} rows to {}",
            csv.lines().count().saturating_sub(1),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
