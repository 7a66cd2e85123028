use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use floorpath_core::{BuildOptions, Coord, FloorPlan, RouteTable};
use serde_json::json;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "floorpath", version, about = "Validate floor plans and query room-to-room routes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the route table and print its stats
    Check {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Shortest walk between two rooms
    Route {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long = "from", value_name = "LABEL")]
        from: String,
        #[arg(long = "to", value_name = "LABEL")]
        to: String,
    },
    /// What sits nearest to a map coordinate
    Nearest {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Only consider named rooms
        #[arg(long = "rooms-only", default_value_t = false)]
        rooms_only: bool,
    },
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Floor plan JSON file
    #[arg(long = "plan", value_name = "PATH")]
    path: PathBuf,

    /// Side length of the square neighbor window
    #[arg(long = "neighbor-window", value_name = "UNITS")]
    neighbor_window: Option<f64>,

    /// Neighbors linked per point
    #[arg(long = "neighbors", value_name = "K")]
    neighbor_count: Option<usize>,

    /// Refuse plans with more points than this
    #[arg(long = "max-points", value_name = "N")]
    max_points: Option<usize>,
}

impl PlanArgs {
    fn options(&self) -> BuildOptions {
        let mut opts = BuildOptions::default();
        if let Some(w) = self.neighbor_window {
            opts.neighbor_window = w;
        }
        if let Some(k) = self.neighbor_count {
            opts.neighbor_count = k;
        }
        if let Some(n) = self.max_points {
            opts.max_points = n;
        }
        opts
    }

    fn load(&self) -> Result<RouteTable> {
        let records = read_plan(&self.path)?.records()?;
        let t0 = Instant::now();
        let table = RouteTable::build(&records, &self.options())
            .with_context(|| format!("building route table from {:?}", self.path))?;
        info!(elapsed_ms = t0.elapsed().as_millis() as u64, stats = ?table.stats(), "table built");
        Ok(table)
    }
}

fn read_plan(path: &Path) -> Result<FloorPlan> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    FloorPlan::from_json_str(&text).with_context(|| format!("failed to parse {:?}", path))
}

fn run(cli: Cli) -> Result<serde_json::Value> {
    match cli.command {
        Command::Check { plan } => {
            let table = plan.load()?;
            let rooms: Vec<&str> = table.rooms().collect();
            Ok(json!({ "ok": true, "stats": table.stats(), "rooms": rooms }))
        }
        Command::Route { plan, from, to } => {
            let table = plan.load()?;
            let route = table.route(&from, &to)?;
            Ok(json!({
                "found": !route.is_empty(),
                "nodes": route.nodes,
                "path": route.path,
                "length": route.length,
            }))
        }
        Command::Nearest { plan, x, y, rooms_only } => {
            let table = plan.load()?;
            let at = Coord::new(x, y);
            if rooms_only {
                Ok(json!({ "room": table.nearest_room(at) }))
            } else {
                Ok(json!({ "pick": table.pick(at) }))
            }
        }
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_ansi(false).with_writer(std::io::stderr).json().finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let cli = Cli::parse();
    info!(?cli, "starting floorpath");
    let out = run(cli)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
