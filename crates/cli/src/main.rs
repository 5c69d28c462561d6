use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use fermata::api::{
    full_body_pose, AnthropometricModel, Beta, Frame, Pose, RouteSpec, SearchCfg, SearchContext,
    SearchError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "fermata")]
#[command(about = "Plan a climbing beta from a marked route")]
struct Cmd {
    /// Optional run label; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Search for a minimum-cost beta and print it
    Solve(SolveArgs),
    /// Validate a route file and summarize it
    Check {
        #[arg(long)]
        route: PathBuf,
    },
    /// Compute skeleton poses for a solved beta
    Pose(PoseArgs),
    /// Print a small provenance JSON block
    Report,
}

/// Coordinate frame and climber size.
#[derive(Args, Clone, Copy, Debug)]
struct Body {
    /// Frame width the normalized coordinates are scaled to
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    /// Frame height; the climber model is scaled against it
    #[arg(long, default_value_t = 1000.0)]
    height: f64,
    /// Climber height in metres
    #[arg(long, default_value_t = 1.7)]
    climber_height: f64,
}

impl Body {
    fn context(&self, route: &RouteSpec) -> Result<SearchContext> {
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!("--width and --height must be positive");
        }
        if !(self.climber_height > 0.0) {
            bail!("--climber-height must be positive");
        }
        let frame = Frame::new(self.width, self.height);
        let model = AnthropometricModel::default().scale(frame.height, self.climber_height);
        Ok(SearchContext::new(route.wall(frame), model, route.finish)?)
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "width": self.width,
            "height": self.height,
            "climber_height": self.climber_height,
        })
    }
}

#[derive(Args)]
struct SolveArgs {
    #[arg(long)]
    route: PathBuf,
    #[command(flatten)]
    body: Body,
    /// Expansion budget (default: library default)
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Write the beta JSON here (plus a provenance sidecar)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write a per-step table (.csv or .parquet)
    #[arg(long)]
    table: Option<PathBuf>,
    /// Include skeleton poses for every state
    #[arg(long)]
    poses: bool,
}

#[derive(Args)]
struct PoseArgs {
    #[arg(long)]
    route: PathBuf,
    /// Beta JSON written by `solve --out`
    #[arg(long)]
    beta: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    body: Body,
}

/// On-disk beta: the search result plus optional poses.
#[derive(Debug, Serialize, Deserialize)]
struct BetaFile {
    #[serde(flatten)]
    beta: Beta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    poses: Option<Vec<Pose>>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve(args) => {
            let file = solve(&args, cmd.tag.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&file)?);
            Ok(())
        }
        Action::Check { route } => check(&route),
        Action::Pose(args) => pose(&args, cmd.tag.as_deref()),
        Action::Report => report(cmd.tag),
    }
}

fn load_route(path: &Path) -> Result<RouteSpec> {
    let route = RouteSpec::load(path)?;
    tracing::info!(
        route = %path.display(),
        holds = route.holds.len(),
        finish = %route.finish,
        "route_loaded"
    );
    Ok(route)
}

fn poses_for(ctx: &SearchContext, beta: &Beta) -> Vec<Pose> {
    beta.states
        .iter()
        .map(|s| full_body_pose(&ctx.wall, &ctx.model, s))
        .collect()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn solve(args: &SolveArgs, tag: Option<&str>) -> Result<BetaFile> {
    tracing::info!(route = %args.route.display(), tag = ?tag, "solve");
    let route = load_route(&args.route)?;
    let ctx = args.body.context(&route)?;
    let mut cfg = SearchCfg::default();
    if args.max_expansions.is_some() {
        cfg.max_expansions = args.max_expansions;
    }

    let beta = match fermata::api::solve(&ctx, route.start, cfg) {
        Ok(beta) => beta,
        Err(e @ (SearchError::NoPath { .. } | SearchError::BudgetExhausted { .. })) => {
            if let Some(stats) = e.stats() {
                tracing::warn!(expanded = stats.expanded, visited = stats.visited, "no_beta");
            }
            return Err(e).context("no beta found");
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(
        moves = beta.moves(),
        cost = beta.cost,
        expanded = beta.stats.expanded,
        "beta_found"
    );

    let payload = Payload::new(
        json!({
            "command": "solve",
            "route": args.route.to_string_lossy(),
            "body": args.body.params(),
            "max_expansions": cfg.max_expansions,
        }),
        tag.map(str::to_string),
    );
    if let Some(path) = &args.table {
        let mut df = table::steps_frame(&beta.steps(&ctx))?;
        table::write_table(&mut df, path)?;
        write_sidecar(path, &payload)?;
    }
    let poses = args.poses.then(|| poses_for(&ctx, &beta));
    let file = BetaFile { beta, poses };
    if let Some(path) = &args.out {
        write_json(path, &file)?;
        write_sidecar(path, &payload)?;
    }
    Ok(file)
}

fn check(path: &Path) -> Result<()> {
    let route = load_route(path)?;
    let summary = json!({
        "holds": route.holds.len(),
        "start": route.start,
        "finish": route.finish,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn pose(args: &PoseArgs, tag: Option<&str>) -> Result<()> {
    let route = load_route(&args.route)?;
    let ctx = args.body.context(&route)?;
    let text = std::fs::read_to_string(&args.beta)
        .with_context(|| format!("reading {}", args.beta.display()))?;
    let file: BetaFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing beta {}", args.beta.display()))?;
    for (i, state) in file.beta.states.iter().enumerate() {
        if let Some(id) = state.holds().into_iter().find(|&id| !ctx.wall.contains(id)) {
            bail!("state {i} of the beta uses hold {id}, which the route does not define");
        }
    }
    let poses = poses_for(&ctx, &file.beta);
    tracing::info!(states = poses.len(), out = %args.out.display(), "poses");
    write_json(&args.out, &poses)?;
    let payload = Payload::new(
        json!({
            "command": "pose",
            "route": args.route.to_string_lossy(),
            "beta": args.beta.to_string_lossy(),
            "body": args.body.params(),
        }),
        tag.map(str::to_string),
    );
    write_sidecar(&args.out, &payload)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = provenance::block(&Payload::new(json!({}), tag), &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
