use clap::{Args, Parser, Subcommand};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use termlife::config::{RunConfig, StartSource};
use termlife::engine::Bounds;
use termlife::playback::{LifeEvent, PlaybackController};
use termlife::settings::Settings;
use termlife::app;
use tracing_subscriber::EnvFilter;

/// Board size used by `print` when neither flags nor settings give one
const PRINT_FALLBACK: Bounds = Bounds::new(10, 10);

#[derive(Parser)]
#[command(name = "termlife")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "Conway's Game of Life in the terminal, with autoplay and generation jumps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a board interactively
    Run {
        #[command(flatten)]
        board: BoardArgs,

        /// Milliseconds between generations while playing
        #[arg(short, long)]
        interval: Option<u64>,

        /// Character used for live cells
        #[arg(short, long)]
        char: Option<char>,
    },

    /// Print a generation to stdout without a UI
    Print {
        #[command(flatten)]
        board: BoardArgs,

        /// Print the live cells as a coordinate list instead of a grid
        #[arg(long)]
        json: bool,

        /// Print every published event as a JSON line
        #[arg(long)]
        events: bool,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Board width (default: settings, then terminal width)
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Board height (default: settings, then terminal height)
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Start set as a JSON list of [x, y] pairs, e.g. "[[1,0],[1,1],[1,2]]"
    #[arg(short, long, conflicts_with_all = ["file", "pattern", "random"])]
    start: Option<String>,

    /// Read the start set from a JSON file
    #[arg(short, long, conflicts_with_all = ["pattern", "random"])]
    file: Option<PathBuf>,

    /// Built-in or settings-defined pattern name
    #[arg(short, long, conflicts_with = "random")]
    pattern: Option<String>,

    /// Random start set with the given density (0.0-1.0)
    #[arg(short, long)]
    random: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Jump straight to this generation
    #[arg(short, long)]
    target: Option<u64>,
}

impl BoardArgs {
    fn apply(self, config: &mut RunConfig) {
        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        config.target = self.target;
        config.start = if let Some(raw) = self.start {
            StartSource::Json(raw)
        } else if let Some(path) = self.file {
            StartSource::File(path)
        } else if let Some(name) = self.pattern {
            StartSource::Pattern(name)
        } else if let Some(density) = self.random {
            StartSource::Random { density, seed: self.seed }
        } else {
            StartSource::Empty
        };
    }
}

fn init_logging(to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if to_file {
        let path = Settings::log_path();
        let file = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| File::options().create(true).append(true).open(&path));
        if let Ok(file) = file {
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // No usable log file: stay silent rather than draw over the board.
    } else {
        builder.with_writer(io::stderr).init();
    }
}

fn invalid(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
}

fn print(config: RunConfig, json: bool, events: bool) -> io::Result<()> {
    let bounds = config.bounds_or(PRINT_FALLBACK);
    let mut pc = PlaybackController::new(bounds, Vec::<LifeEvent>::new());

    let input = config.start.load(bounds, &config.custom_patterns).map_err(invalid)?;
    input.apply(&mut pc).map_err(invalid)?;
    pc.set_target_generation(config.target.unwrap_or(0)).map_err(invalid)?;

    if events {
        for event in pc.observer() {
            println!("{}", serde_json::to_string(event).map_err(invalid)?);
        }
    }

    let sim = pc.simulation();
    if json {
        println!("{}", sim.export_active());
    } else if !events {
        let mut grid = vec![vec!['.'; bounds.width as usize]; bounds.height as usize];
        for c in sim.active_coords() {
            grid[c.y as usize][c.x as usize] = config.alive_char;
        }
        println!("generation {} ({})", sim.generation(), pc.state().label());
        for row in grid {
            println!("{}", row.into_iter().collect::<String>());
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Commands::Run { .. }));
    let mut config = RunConfig::from_settings(Settings::load());

    match cli.command {
        Commands::Run { board, interval, char } => {
            board.apply(&mut config);
            if let Some(ms) = interval {
                config.interval = Duration::from_millis(ms.max(1));
            }
            if let Some(ch) = char {
                config.alive_char = ch;
            }
            app::run(config)?;
        }
        Commands::Print { board, json, events } => {
            board.apply(&mut config);
            if let Err(e) = print(config, json, events) {
                eprintln!("termlife: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
