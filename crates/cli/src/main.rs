use std::fs;
use std::io::BufRead;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

use stephull::hull::rand::{draw_cloud_uniform, Bounds2, CloudCfg, CloudCount, ReplayToken};
use stephull::hull::{chain_hull, chain_hull_steps, HullMutation};
use stephull::step::{Pacing, StepRunner};
use stephull::Vec2;

mod points;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Convex hull demo driver")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Args)]
struct CloudArgs {
    /// JSON file with [[x, y], ...]; omit to sample a random cloud
    #[arg(long)]
    input: Option<String>,
    /// Cloud size when sampling
    #[arg(long, default_value_t = 15)]
    count: usize,
    /// Sampler seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Half-width of the centered square sampling window
    #[arg(long, default_value_t = 100.0)]
    extent: f64,
}

#[derive(Subcommand)]
enum Action {
    /// Free-run the sweep and emit cloud + hull as JSON
    Hull {
        #[command(flatten)]
        cloud: CloudArgs,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Step the sweep interactively: one advance per stdin line
    Step {
        #[command(flatten)]
        cloud: CloudArgs,
    },
}

#[derive(Serialize)]
struct HullDoc {
    cloud: Vec<[f64; 2]>,
    hull: Vec<[f64; 2]>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Hull { cloud, out } => hull(cloud, out),
        Action::Step { cloud } => step(cloud),
    }
}

fn load_cloud(args: &CloudArgs) -> Result<Vec<Vec2<f64>>> {
    match &args.input {
        Some(path) => {
            let cloud = points::read_points(path)?;
            tracing::info!(points = cloud.len(), path = %path, "loaded cloud");
            Ok(cloud)
        }
        None => {
            let cfg = CloudCfg {
                count: CloudCount::Fixed(args.count),
                bounds: Bounds2 {
                    min: Vec2::new(-args.extent, -args.extent),
                    max: Vec2::new(args.extent, args.extent),
                },
            };
            let cloud = draw_cloud_uniform(
                cfg,
                ReplayToken {
                    seed: args.seed,
                    index: 0,
                },
            );
            tracing::info!(points = cloud.len(), seed = args.seed, "sampled cloud");
            Ok(cloud)
        }
    }
}

fn hull(args: CloudArgs, out: Option<String>) -> Result<()> {
    let cloud = load_cloud(&args)?;
    let hull = chain_hull(&cloud);
    tracing::info!(vertices = hull.len(), "hull complete");

    let doc = HullDoc {
        cloud: points::to_pairs(&cloud),
        hull: points::to_pairs(&hull),
    };
    match out {
        Some(path) => {
            fs::write(&path, serde_json::to_vec_pretty(&doc)?)?;
            tracing::info!(path, "wrote hull");
        }
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}

fn step(args: CloudArgs) -> Result<()> {
    let cloud = load_cloud(&args)?;

    // Count the mutations up front so the session can announce its length.
    let total = {
        let mut n = 0usize;
        let _ = chain_hull_steps(&cloud, &mut |_: HullMutation| {
            n += 1;
            true
        });
        n
    };

    let mut runner = StepRunner::new();
    runner.start_run(cloud, Pacing::Stepped)?;
    tracing::info!(mutations = total, "stepped run started; enter advances");

    if total == 0 {
        let hull = runner.await_completion()?;
        println!("{}", serde_json::to_string(&points::to_pairs(&hull))?);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut applied = 0usize;
    let mut prev_len = 0usize;
    for line in stdin.lock().lines() {
        let _ = line?;
        runner.request_advance();
        // Exactly one mutation lands per signal; its ±1 length change marks it.
        let seq = loop {
            let (seq, _) = runner.observe_hull();
            if seq.len() != prev_len {
                break seq;
            }
            thread::sleep(Duration::from_millis(1));
        };
        prev_len = seq.len();
        applied += 1;
        tracing::debug!(applied, len = seq.len(), "mutation applied");
        println!("{}", serde_json::to_string(&points::to_pairs(&seq))?);
        if applied == total {
            break;
        }
    }

    if applied < total {
        tracing::info!(applied, total, "input ended before completion; cancelling");
        runner.cancel_run();
        return Ok(());
    }

    let hull = runner.await_completion()?;
    tracing::info!(vertices = hull.len(), "run completed");
    println!("{}", serde_json::to_string(&points::to_pairs(&hull))?);
    Ok(())
}
