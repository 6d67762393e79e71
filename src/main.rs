//! CLI: generate a maze, print it, and optionally roll the ball through it

use anyhow::Context;
use clap::Parser;
use log::info;
use mazeball::ascii::render;
use mazeball::carving::{generate, RandomOrder};
use mazeball::constants::{
    DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
};
use mazeball::geometry::emit;
use mazeball::input::KeyEvent;
use mazeball::physics::MazeSimulation;
use mazeball::settings::MazeSettings;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

/// Maze generator with a physics playground
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of cell rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of cell columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Play area width, in world units
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: f32,

    /// Play area height, in world units
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: f32,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Physics ticks to simulate after generating
    #[arg(long, default_value_t = 0)]
    steps: u64,

    /// Key code held down for the whole simulation, e.g. 68 for D
    #[arg(long)]
    press: Option<u32>,

    /// Don't print the maze
    #[arg(long)]
    no_ascii: bool,
}

impl From<&Args> for MazeSettings {
    fn from(args: &Args) -> Self {
        Self {
            rows: args.rows,
            cols: args.cols,
            viewport_width: args.width,
            viewport_height: args.height,
            seed: args.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let settings = MazeSettings::from(&args);
    let config = settings.grid_config().context("Invalid maze settings")?;

    let maze = match settings.seed {
        Some(seed) => generate(config, &mut RandomOrder::new(StdRng::seed_from_u64(seed)))?,
        None => generate(config, &mut RandomOrder::new(thread_rng()))?,
    };
    info!("Generated a {}x{} maze", config.rows(), config.cols());

    if !args.no_ascii {
        print!("{}", render(maze.walls()));
    }

    let layout = emit(maze.walls(), &config)?;

    if args.steps > 0 {
        let mut simulation = MazeSimulation::new(&layout)?;
        if let Some(code) = args.press {
            simulation.handle_key(KeyEvent::Pressed(code));
        }
        for _ in 0..args.steps {
            simulation.step();
        }
        let position = simulation.actor_position();
        info!(
            "Actor at ({:.1}, {:.1}) after {} ticks, goal {}",
            position.x,
            position.y,
            simulation.ticks(),
            if simulation.is_won() { "reached" } else { "not reached" }
        );
    }

    Ok(())
}
