//! CESM spin-up diagnostics CLI.
//!
//! Loads monthly history output from a case archive, checks each monitored
//! variable for equilibration, and writes a per-variable progress chart.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use cesm_diag::chart::render_spinup_series;
use cesm_diag::history::{discover_history_files, load_history_files};
use cesm_diag::spinup::{check_equilibration, MonitorConfig, VariableCheck};

/// Spin-up diagnostics for CESM cases.
#[derive(Parser)]
#[command(name = "cesm-diag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the case directory (the one containing archive/).
    #[arg(long)]
    case: PathBuf,

    /// Number of simulated years of monthly files to analyze.
    #[arg(long, default_value = "10")]
    years: u32,

    /// Output directory for plots.
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Max acceptable trend magnitude (variable units per year).
    #[arg(long, default_value = "0.01")]
    threshold: f64,
}

fn main() {
    let cli = Cli::parse();

    let config = MonitorConfig {
        years: cli.years,
        threshold: cli.threshold,
        ..Default::default()
    };

    std::fs::create_dir_all(&cli.output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        process::exit(1);
    });

    // Fail fast on required streams before printing any per-group output.
    for group in &config.groups {
        let hist_dir = cli.case.join(&group.hist_subdir);
        if group.required && !hist_dir.is_dir() {
            eprintln!(
                "Error: cannot find {} history files in {}",
                group.label,
                hist_dir.display()
            );
            process::exit(1);
        }
    }

    println!("{}", "=".repeat(60));
    println!("CESM Spin-up Diagnostics");
    println!("{}", "=".repeat(60));
    println!("Case: {}", cli.case.display());
    println!("Years: {}", config.years);
    println!("Threshold: {} units/year", config.threshold);
    println!("{}", "-".repeat(60));

    let mut had_errors = false;

    for group in &config.groups {
        let hist_dir = cli.case.join(&group.hist_subdir);
        if !hist_dir.is_dir() {
            println!("\nNo {} history directory, skipping", group.label);
            continue;
        }

        println!("\nAnalyzing {} variables...", group.label);

        let files = discover_history_files(&hist_dir, &group.file_tag, config.max_files())
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                process::exit(1);
            });
        if files.is_empty() {
            println!("  No {} files found", group.label);
            continue;
        }
        println!("  Loading {} monthly files", files.len());

        let dataset = load_history_files(&files, &group.variables).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

        for variable in &group.variables {
            match check_equilibration(&dataset, variable, config.threshold) {
                Ok(VariableCheck::Analyzed(report)) => {
                    let status = if report.equilibrated {
                        "equilibrated"
                    } else {
                        "still trending"
                    };
                    println!(
                        "  {}: {} (trend: {:+.6}/year)",
                        report.variable,
                        status,
                        report.trend()
                    );
                    match render_spinup_series(&report, &cli.output) {
                        Ok(path) => println!("    saved plot: {}", path.display()),
                        Err(e) => {
                            eprintln!("    Error rendering {}: {}", report.variable, e);
                            had_errors = true;
                        }
                    }
                }
                Ok(VariableCheck::NotFound { variable }) => {
                    println!("  Warning: variable {} not found", variable);
                }
                Err(e) => {
                    println!("  {}: skipped ({})", variable, e);
                }
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!(
        "Diagnostics complete. Plots saved to: {}",
        cli.output.display()
    );
    println!("{}", "=".repeat(60));

    if had_errors {
        process::exit(1);
    }
}
