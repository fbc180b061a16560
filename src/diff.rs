use std::path::Path;

use anyhow::Result;
use similar::{capture_diff_slices, Algorithm, DiffTag};
use tracing::{debug, info};

use crate::cli::Options;
use crate::scanner::{scan_dir, FileSet};
use crate::utils::{count_lines, file_bytes_equal, read_for_diff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Unchanged,
    Changed,
    OnlyLeft,
    OnlyRight,
}

impl FileStatus {
    pub fn tag(self) -> &'static str {
        match self {
            FileStatus::Unchanged => "[=]",
            FileStatus::Changed => "[x]",
            FileStatus::OnlyLeft => "[+]",
            FileStatus::OnlyRight => "[-]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub rel: String,
    pub status: FileStatus,
    /// Line count that went into the total.
    pub lines: usize,
    /// Lines that went into the diff count.
    pub diff_lines: usize,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub files: usize,
    pub diff_lines: usize,
    pub total_lines: usize,
}

impl Counters {
    /// `diff_lines / total_lines * 100`, or `None` when nothing was counted.
    pub fn percent_diff(&self) -> Option<f64> {
        if self.total_lines == 0 {
            return None;
        }
        Some(self.diff_lines as f64 / self.total_lines as f64 * 100.0)
    }
}

#[derive(Debug, Default)]
pub struct Comparison {
    pub files: Vec<FileReport>,
    pub counters: Counters,
}

/// Lines inserted or deleted by a line diff of the two files.
pub fn count_changed_lines(a_path: &Path, b_path: &Path, normalize_eol: bool) -> Result<usize> {
    let a_bytes = read_for_diff(a_path, normalize_eol)?;
    let b_bytes = read_for_diff(b_path, normalize_eol)?;
    Ok(count_changed_bytes(&a_bytes, &b_bytes))
}

/// Lines are the pieces between `\n` separators, compared as raw bytes.
/// A trailing newline therefore adds one empty final line.
fn count_changed_bytes(a: &[u8], b: &[u8]) -> usize {
    let a_lines: Vec<&[u8]> = a.split(|&c| c == b'\n').collect();
    let b_lines: Vec<&[u8]> = b.split(|&c| c == b'\n').collect();

    capture_diff_slices(Algorithm::Myers, &a_lines, &b_lines)
        .iter()
        .map(|op| match op.as_tag_tuple() {
            (DiffTag::Equal, _, _) => 0,
            (DiffTag::Delete, old, _) => old.len(),
            (DiffTag::Insert, _, new) => new.len(),
            (DiffTag::Replace, old, new) => old.len() + new.len(),
        })
        .sum()
}

fn diff_pair(a_path: &Path, b_path: &Path, opts: &Options) -> Result<usize> {
    if file_bytes_equal(a_path, b_path)? {
        return Ok(0);
    }
    count_changed_lines(a_path, b_path, opts.normalize_eol)
}

pub fn compare_file_sets(left: &FileSet, right: &FileSet, opts: &Options) -> Result<Comparison> {
    let mut out = Comparison::default();

    for (rel, a_file) in left {
        let lines = count_lines(a_file);
        let (status, diff_lines) = match right.get(rel) {
            Some(b_file) => {
                let d = diff_pair(a_file, b_file, opts)?;
                if d > 0 {
                    (FileStatus::Changed, d)
                } else {
                    (FileStatus::Unchanged, 0)
                }
            }
            None => (FileStatus::OnlyLeft, lines),
        };
        out.push(rel, status, lines, diff_lines);
    }

    for (rel, b_file) in right {
        if left.contains_key(rel) {
            continue;
        }
        let lines = count_lines(b_file);
        out.push(rel, FileStatus::OnlyRight, lines, lines);
    }

    Ok(out)
}

impl Comparison {
    fn push(&mut self, rel: &str, status: FileStatus, lines: usize, diff_lines: usize) {
        debug!(file = rel, ?status, lines, diff_lines, "compared");
        self.counters.files += 1;
        self.counters.total_lines += lines;
        self.counters.diff_lines += diff_lines;
        self.files.push(FileReport {
            rel: rel.to_string(),
            status,
            lines,
            diff_lines,
        });
    }
}

pub fn run_diff_percent(a_root: &Path, b_root: &Path, opts: &Options) -> Result<Comparison> {
    let left = scan_dir(a_root, opts)?;
    let right = scan_dir(b_root, opts)?;
    info!(left = left.len(), right = right.len(), "scanned both trees");

    compare_file_sets(&left, &right, opts)
}
