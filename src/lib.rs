//
// lib.rs
// diff-percent
//
// Library entry that re-exports the scanner, line counter, differ and report so the binary and the integration tests share one pipeline.
//
// Thales Matheus Mendonça Santos - October 2026
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod diff;
pub mod report;
pub mod scanner;
pub mod utils;

pub use cli::{build_options, Args, Options};
pub use diff::{compare_file_sets, run_diff_percent, Comparison, Counters, FileStatus};
pub use report::write_report;
pub use scanner::{scan_dir, FileSet};
