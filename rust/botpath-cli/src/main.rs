use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use botpath_cli::{blocked_cells, plan, positions, write_json, Config, Drive, Overrides};
use botpath_core::Heuristic;

#[derive(Parser, Debug)]
#[command(name = "botpath", version, about = "Plan a smoothed robot route across the field")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a route and smooth it
    Plan(PlanArgs),
    /// Print the blocked grid cells for the obstacles in a position file
    Blocked(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Position file: goal, robot, then obstacles, one `x,y` per line in metres
    #[arg(long, value_name = "PATH")]
    positions: PathBuf,

    /// JSON planner options
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Write JSON here instead of stdout
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Bezier sample intervals
    #[arg(long, value_name = "N")]
    samples: Option<usize>,

    /// euclidean, manhattan, octile or dijkstra
    #[arg(long, value_name = "NAME")]
    heuristic: Option<Heuristic>,

    /// Drive the search one expansion at a time
    #[arg(long)]
    step: bool,

    /// Stop stepping after this many expansions
    #[arg(long, value_name = "N", requires = "step")]
    max_steps: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).json().init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }
    info!(core_version = %botpath_core::version(), "botpath starting");

    match cli.command {
        Command::Plan(args) => {
            let mut options = Config::from_env(args.input.options.as_deref())?.options;
            Overrides { samples: args.samples, heuristic: args.heuristic, max_steps: args.max_steps }.apply(&mut options);
            let pos = positions::load(&args.input.positions, options.width, options.height)?;
            let drive = if args.step { Drive::Stepped { max_steps: options.max_steps } } else { Drive::Batch };
            let report = plan(options, &pos, drive)?;
            write_json(&report, args.input.out.as_ref())
        }
        Command::Blocked(args) => {
            let options = Config::from_env(args.options.as_deref())?.options;
            let pos = positions::load(&args.positions, options.width, options.height)?;
            let cells = blocked_cells(options, &pos)?;
            write_json(&cells, args.out.as_ref())
        }
    }
}
