//! Weft CLI: simulation, benchmarking, and config validation.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about = "Weft: mass-spring cloth simulation kernel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation headlessly, optionally exporting frames.
    Simulate {
        /// Path to cloth config (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of ticks to run.
        #[arg(short, long, default_value_t = 240)]
        ticks: u32,

        /// Frame delta per tick (seconds).
        #[arg(long, default_value_t = weft_types::constants::DEFAULT_DT)]
        dt: f32,

        /// Write every frame to this JSON file.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_cloth, corner_pinned, zero_gravity, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a cloth config (.toml) or a frame export (.json).
    Validate {
        /// Path to the file.
        path: String,
    },
}

fn main() {
    // Honours RUST_LOG through the env-filter feature
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            ticks,
            dt,
            output,
        } => commands::simulate(config.as_deref(), ticks, dt, output.as_deref()),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
