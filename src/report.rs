use std::io::{self, Write};

use crate::diff::Comparison;

pub const BANNER: &str = "Diff Percent";

pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{p:.6}"),
        None => "n/a".to_string(),
    }
}

/// Banner, one tagged line per file, then the summary block.
pub fn write_report<W: Write>(out: &mut W, comparison: &Comparison) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    for file in &comparison.files {
        writeln!(out, "{} {}", file.status.tag(), file.rel)?;
    }

    let c = &comparison.counters;
    writeln!(out)?;
    writeln!(out, "      FILE COUNT: {}", c.files)?;
    writeln!(out, " LINE DIFF COUNT: {}", c.diff_lines)?;
    writeln!(out, "LINE TOTAL COUNT: {}", c.total_lines)?;
    writeln!(out, "    PERCENT DIFF: {}", format_percent(c.percent_diff()))?;
    Ok(())
}
