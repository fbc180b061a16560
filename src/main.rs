use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use diff_percent::{build_options, run_diff_percent, write_report, Args};

fn main() -> Result<()> {
    // RUST_LOG=debug for per-file tracing; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let opts = build_options(&args)?;

    let comparison = run_diff_percent(&args.path1, &args.path2, &opts)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &comparison)?;
    out.flush()?;

    Ok(())
}
