//! Kohonen CLI - Self-Organizing Map trainer
//!
//! Command-line interface for training chain, ring and grid maps on
//! generated 2D samples.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use kohonen::{
    ChainBoundary, Config, Coordinate, GridPosition, GridTopology, Result, SampleDistribution,
    SampleGenerator, SamplingConfig, Snapshot, SomTrainer, Topology, TrainingConfig,
    TrainingReport, Visualizer, GRID_SIDE,
};
use log::error;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kohonen")]
#[command(author = "Kohonen Contributors")]
#[command(version)]
#[command(about = "Self-Organizing Map trainer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a map on generated samples and print the final neurons
    Train {
        /// Map topology
        #[arg(short, long, value_enum, default_value = "chain")]
        topology: TopologyArg,

        /// Sample distribution
        #[arg(short, long, value_enum, default_value = "disk")]
        distribution: DistributionArg,

        /// Disk radius (outer radius for the annulus)
        #[arg(short, long, default_value = "2.0")]
        radius: f64,

        /// Inner radius of the annulus
        #[arg(long, default_value = "2.0")]
        inner_radius: f64,

        /// Outer radius of the annulus
        #[arg(long, default_value = "4.0")]
        outer_radius: f64,

        /// Number of training samples
        #[arg(short = 'n', long, default_value = "200")]
        samples: usize,

        /// Number of neurons (chain and ring only; grids are 5x5)
        #[arg(short = 'm', long, default_value = "30")]
        neurons: usize,

        /// Number of passes over the samples
        #[arg(short, long, default_value = "10")]
        passes: usize,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Keep the sample order fixed across passes
        #[arg(long)]
        no_shuffle: bool,

        /// Never pull index 0 of a chain as a left-hand neighbor
        #[arg(long)]
        exclusive_boundary: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the 5x5 grid adjacency
    Adjacency,
}

#[derive(Clone, Copy, ValueEnum)]
enum TopologyArg {
    Chain,
    Ring,
    Grid,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Chain => Topology::Chain,
            TopologyArg::Ring => Topology::Ring,
            TopologyArg::Grid => Topology::Grid,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DistributionArg {
    Disk,
    Annulus,
    Mixed,
}

struct TrainArgs {
    topology: Topology,
    config: Config,
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Train {
            topology,
            distribution,
            radius,
            inner_radius,
            outer_radius,
            samples,
            neurons,
            passes,
            seed,
            no_shuffle,
            exclusive_boundary,
            json,
        } => {
            let distribution = match distribution {
                DistributionArg::Disk => SampleDistribution::Disk { radius },
                DistributionArg::Annulus => SampleDistribution::Annulus {
                    inner: inner_radius,
                    outer: outer_radius,
                },
                DistributionArg::Mixed => SampleDistribution::Mixed { radius },
            };
            let chain_boundary = if exclusive_boundary {
                ChainBoundary::Exclusive
            } else {
                ChainBoundary::Inclusive
            };

            train_map(TrainArgs {
                topology: topology.into(),
                config: Config {
                    training: TrainingConfig {
                        passes,
                        shuffle: !no_shuffle,
                        seed: seed.map(|s| s.wrapping_add(1)),
                        chain_boundary,
                        ..Default::default()
                    },
                    sampling: SamplingConfig {
                        sample_count: samples,
                        distribution,
                        neuron_count: neurons,
                        seed,
                        ..Default::default()
                    },
                },
                json,
            })
        }

        Commands::Adjacency => show_adjacency(),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Drives a progress bar from training snapshots.
struct ProgressVisualizer {
    bar: ProgressBar,
    samples_per_pass: u64,
}

impl ProgressVisualizer {
    fn new(passes: usize, samples_per_pass: usize) -> Self {
        let bar = ProgressBar::new((passes * samples_per_pass) as u64);
        let style = ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .map(|s| s.progress_chars("█▓▒░  "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        Self {
            bar,
            samples_per_pass: samples_per_pass as u64,
        }
    }
}

impl Visualizer for ProgressVisualizer {
    fn on_sample(&mut self, snapshot: &Snapshot<'_>) {
        self.bar
            .set_position(snapshot.pass as u64 * self.samples_per_pass + snapshot.sample_index as u64 + 1);
        self.bar.set_message(format!(
            "Pass {} (radius {})",
            snapshot.pass + 1,
            snapshot.radius
        ));
    }

    fn on_finish(&mut self, _snapshot: &Snapshot<'_>) {
        self.bar.finish_and_clear();
    }
}

#[derive(Serialize)]
struct TrainOutput<'a> {
    report: &'a TrainingReport,
    neurons: Vec<Coordinate>,
    polylines: Vec<Vec<Coordinate>>,
}

fn train_map(args: TrainArgs) -> Result<()> {
    let start_time = Instant::now();
    args.config.validate()?;
    let Config { training, sampling } = args.config;

    let mut generator = SampleGenerator::new(sampling)?;
    let samples = generator.samples()?;
    let mut map = generator.map(args.topology)?;

    if !args.json {
        println!("Kohonen Self-Organizing Map");
        println!(
            "   {} map, {} neurons, {} samples, {} passes",
            args.topology,
            map.len(),
            samples.len(),
            training.passes
        );
        println!();
    }

    let mut progress = ProgressVisualizer::new(training.passes, samples.len());
    let mut trainer = SomTrainer::new(training);
    let report = trainer.train(&mut map, &samples, &mut progress)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        let output = TrainOutput {
            report: &report,
            neurons: map.positions(),
            polylines: map.polylines(),
        };
        serde_json::to_writer_pretty(&mut out, &output)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "✓ Absorbed {} samples over {} passes (final radius {})",
        report.samples_seen, report.passes, report.final_radius
    )?;
    writeln!(out)?;
    writeln!(out, "{:>6}  {:>10}  {:>10}", "neuron", "x", "y")?;
    for (i, pos) in map.positions().iter().enumerate() {
        let label = match args.topology {
            Topology::Grid => format!("{},{}", i / GRID_SIDE, i % GRID_SIDE),
            Topology::Chain | Topology::Ring => i.to_string(),
        };
        writeln!(out, "{:>6}  {:>10.4}  {:>10.4}", label, pos.x, pos.y)?;
    }
    writeln!(out)?;
    writeln!(out, "Done in {}", HumanDuration(start_time.elapsed()))?;

    Ok(())
}

fn show_adjacency() -> Result<()> {
    let topology = GridTopology::standard();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for row in 0..topology.side() {
        for col in 0..topology.side() {
            let neighbors: Vec<String> = topology
                .neighbors_of(GridPosition::new(row, col))
                .map(|p| format!("({},{})", p.row, p.col))
                .collect();
            writeln!(out, "({},{}) -> {}", row, col, neighbors.join(" "))?;
        }
    }

    Ok(())
}
