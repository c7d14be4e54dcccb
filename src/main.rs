//! Console driver for the toroidal Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use torus_life::{
    config::{CliOverrides, ClearMode, OutputFormat, SeedMode, Settings},
    game_of_life::{create_example_patterns, load_grid_from_file, save_grid_as_json, save_grid_to_file},
    utils::{format_grid_with_coords, ColorOutput, GridRenderer},
    Driver, Grid,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus_life")]
#[command(about = "Conway's Game of Life on a wrapping grid")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides shared by the simulation commands
#[derive(clap::Args, Debug, Default)]
struct SeedArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Grid width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Random seed (overrides config)
    #[arg(short, long, conflicts_with = "pattern")]
    seed: Option<u64>,

    /// Pattern file to start from; grid size defaults to the pattern's
    #[arg(short, long)]
    pattern: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the simulation in the terminal until Ctrl-C
    Run {
        #[command(flatten)]
        seed: SeedArgs,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,
    },

    /// Advance a number of generations and print the result
    Step {
        #[command(flatten)]
        seed: SeedArgs,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Save the final grid to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format of the saved grid (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Print row and column numbers
        #[arg(long)]
        coords: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = dispatch(cli.command) {
        eprintln!("{}", failure_message(&err));
        std::process::exit(1);
    }
}

/// One line naming the failure and every cause behind it
fn failure_message(err: &anyhow::Error) -> String {
    ColorOutput::error(&format!("Error: {:#}", err))
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run { seed, interval, generations } => {
            run_command(seed, interval, generations)
        }
        Commands::Step { seed, generations, output, format, coords } => {
            step_command(seed, generations, output, format, coords)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

/// Logs go to stderr so they never interleave with frames on stdout
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "torus_life=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Load config, apply CLI overrides and validate.
///
/// Also returns the parsed `--pattern` grid when it was read to size the grid,
/// so the engine can be built without reading the file twice.
fn load_settings(args: &SeedArgs, mut overrides: CliOverrides) -> Result<(Settings, Option<Grid>)> {
    let mut settings = Settings::load_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    overrides.width = args.width;
    overrides.height = args.height;
    overrides.seed = args.seed;
    overrides.pattern = args.pattern.clone();

    // A pattern given on the command line sizes the grid unless dimensions are explicit
    let mut preloaded = None;
    if let Some(ref pattern) = args.pattern {
        if args.width.is_none() && args.height.is_none() {
            let grid = load_grid_from_file(pattern)?;
            overrides.width = Some(grid.width());
            overrides.height = Some(grid.height());
            preloaded = Some(grid);
        }
    }

    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;
    Ok((settings, preloaded))
}

fn run_command(args: SeedArgs, interval: Option<u64>, generations: Option<u64>) -> Result<()> {
    let (settings, preloaded) = load_settings(&args, CliOverrides {
        tick_interval_ms: interval,
        max_generations: generations,
        ..Default::default()
    })?;

    let engine = settings.build_engine_with(preloaded)?;
    let mut driver = Driver::with_engine(engine, &settings);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let mut stdout = std::io::stdout().lock();
    let summary = runtime.block_on(driver.run_until(&mut stdout, tokio::signal::ctrl_c()))?;

    if summary.interrupted {
        println!();
        println!("Conway's Game of Life");
        println!("Stopped after {} generations with {} living cells", summary.generations, summary.final_population);
    } else {
        println!("{}", ColorOutput::success(&format!(
            "Reached generation {} with {} living cells",
            summary.generations, summary.final_population
        )));
    }

    Ok(())
}

fn step_command(
    args: SeedArgs,
    generations: u64,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    coords: bool,
) -> Result<()> {
    let (mut settings, preloaded) = load_settings(&args, CliOverrides::default())?;
    if let Some(format) = format {
        settings.output.format = format;
    }

    let mut engine = settings.build_engine_with(preloaded)?;
    engine.advance_by(generations);
    let state = engine.current_state();

    if coords {
        print!("{}", format_grid_with_coords(state));
    } else {
        let renderer = GridRenderer::new(settings.display.alive_glyph, settings.display.dead_glyph, ClearMode::None);
        print!("{}", renderer.render(state));
    }
    println!(
        "Generation {}: {} living cells ({:.1}%)",
        engine.generation(),
        state.population(),
        state.density() * 100.0
    );

    if let Some(path) = output {
        save_output(state, &path, settings.output.format)?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", path.display())));
    }

    Ok(())
}

fn save_output(grid: &Grid, path: &Path, format: OutputFormat) -> Result<()> {
    let saved = match format {
        OutputFormat::Text => save_grid_to_file(grid, path),
        OutputFormat::Json => save_grid_as_json(grid, path),
    };
    saved.with_context(|| format!("Failed to save grid to {}", path.display()))
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Skipped: {} (already exists)", config_path.display()
        )));
    }

    create_example_patterns(&patterns_dir)
        .context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    // Glider on its own small torus, stepping quickly
    let examples_dir = config_dir.join("examples");
    let mut glider = Settings::default();
    glider.grid.width = 8;
    glider.grid.height = 8;
    glider.seed.mode = SeedMode::Pattern;
    glider.seed.pattern_file = Some(PathBuf::from("patterns/glider.txt"));
    glider.simulation.tick_interval_ms = 200;
    glider.display.alive_glyph = '#';
    glider.display.dead_glyph = '.';
    glider.to_file(&examples_dir.join("glider.yaml"))?;

    // Reproducible random soup
    let mut soup = Settings::default();
    soup.seed.random_seed = Some(2024);
    soup.simulation.max_generations = Some(500);
    soup.display.clear_mode = ClearMode::Ansi;
    soup.to_file(&examples_dir.join("soup.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/examples/glider.yaml");

    Ok(())
}
