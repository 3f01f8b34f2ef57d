//! `fibheap-replay` replays a workload script against a classic and a naive
//! Fibonacci heap and prints the average number of structural steps per
//! extract-min and per decrease, one line per run.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use rust_fibonacci_heap::workload::{self, ReplayOptions};

#[derive(Parser)]
#[command(about = "Measure classic vs naive Fibonacci heap work on a scripted workload")]
struct Args {
    /// Workload script (`# N`, `I id prio`, `M`, `D id prio` lines)
    input: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    /// Write statistics here instead of stdout
    output: Option<PathBuf>,
    #[arg(long)]
    /// Only measure the classic heap
    classic_only: bool,
}

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("fibheap_replay=info");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();
    let input = File::open(&args.input)
        .with_context(|| format!("opening workload {}", args.input.display()))?;

    info!("replaying {}", args.input.display());
    let options = ReplayOptions {
        classic_only: args.classic_only,
    };
    let runs = workload::replay(BufReader::new(input), options)
        .with_context(|| format!("replaying {}", args.input.display()))?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    for run in &runs {
        writeln!(out, "{run}")?;
    }
    out.flush()?;

    info!("{} runs replayed", runs.len());
    Ok(())
}
