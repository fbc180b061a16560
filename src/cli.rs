use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glob::Pattern;

pub const USAGE: &str = "diff-percent <path1> <path2> [--filter] [--exclude]";

#[derive(Parser, Debug)]
#[command(
    name = "diff-percent",
    version,
    about = "Compare two directory trees and report how much of their content differs",
    override_usage = USAGE
)]
pub struct Args {
    /// First directory (left side)
    pub path1: PathBuf,

    /// Second directory (right side)
    pub path2: PathBuf,

    /// Only consider files whose name contains this substring
    #[arg(long, default_value = "", num_args = 0..=1, default_missing_value = "")]
    pub filter: String,

    /// Skip files whose full path contains this substring
    #[arg(long, default_value = "", num_args = 0..=1, default_missing_value = "")]
    pub exclude: String,

    /// Glob patterns to ignore (can be repeated or comma separated)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    pub ignore: Vec<String>,

    /// Normalize EOL (CRLF/LF) before text comparison
    #[arg(short = 'E', long)]
    pub normalize_eol: bool,
}

#[derive(Debug, Default)]
pub struct Options {
    pub filter: String,
    pub exclude: String,
    pub ignore_patterns: Vec<Pattern>,
    pub normalize_eol: bool,
}

pub fn build_options(args: &Args) -> Result<Options> {
    let patterns = args
        .ignore
        .iter()
        .map(|s| Pattern::new(s).with_context(|| format!("Invalid glob pattern: {s}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(Options {
        filter: args.filter.clone(),
        exclude: args.exclude.clone(),
        ignore_patterns: patterns,
        normalize_eol: args.normalize_eol,
    })
}
