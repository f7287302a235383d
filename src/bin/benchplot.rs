//! Benchmark scaling visualization CLI.
//!
//! Derives speedup, efficiency, and resource cost from a table of benchmark
//! runs and renders the four scaling charts.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use cesm_diag::benchmark::{calculate_metrics, BenchmarkTable};
use cesm_diag::chart::{
    render_cost, render_efficiency, render_summary, render_throughput, ChartError,
};

/// Generate scaling charts from CESM benchmark runs.
#[derive(Parser)]
#[command(name = "benchplot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output directory for plots.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// JSON file with an array of benchmark samples
    /// (defaults to the built-in Eiger table).
    #[arg(short, long)]
    data: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let table = match &cli.data {
        Some(path) => BenchmarkTable::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => BenchmarkTable::default(),
    };

    std::fs::create_dir_all(&cli.output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        process::exit(1);
    });

    println!("{}", "=".repeat(60));
    println!("CESM Benchmark Visualization");
    println!("{}", "=".repeat(60));
    println!("\nData from {} benchmark runs:", table.len());
    for sample in &table.samples {
        println!(
            "  {:2} nodes: {:5.2} years/day ({:.1} sec/day)",
            sample.nodes, sample.years_per_day, sample.seconds_per_day
        );
    }

    let metrics = calculate_metrics(&table).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    println!("\nGenerating plots in: {}", cli.output.display());
    println!("{}", "-".repeat(60));

    report_chart(render_throughput(&metrics, &cli.output));
    report_chart(render_efficiency(&metrics, &cli.output));
    report_chart(render_cost(&metrics, &cli.output));
    report_chart(render_summary(&metrics, &cli.output));

    println!("{}", "-".repeat(60));
    println!("Summary:");
    let (nodes, efficiency) = metrics.best_efficiency();
    println!("  Best efficiency:  {:.1}% ({} nodes)", efficiency, nodes);
    let (nodes, throughput) = metrics.best_throughput();
    println!("  Best throughput:  {:.2} years/day ({} nodes)", throughput, nodes);
    let (nodes, cost) = metrics.lowest_cost();
    println!("  Lowest cost:      {:.1} NH/year ({} nodes)", cost, nodes);

    let last = metrics.len() - 1;
    println!(
        "  {}-node speedup:  {:.2}x (efficiency: {:.0}%)",
        metrics.nodes[last], metrics.speedup[last], metrics.efficiency[last]
    );
    println!();
}

fn report_chart(result: Result<PathBuf, ChartError>) {
    match result {
        Ok(path) => println!("  Created: {}", path.display()),
        Err(e) => {
            eprintln!("Error rendering chart: {}", e);
            process::exit(1);
        }
    }
}
