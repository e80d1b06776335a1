use crate::metrics::Summary;
use crate::types::ResponseTime;
use std::io::{self, Write};
use std::time::Duration;

pub fn write_response<W: Write>(out: &mut W, time: &ResponseTime) -> io::Result<()> {
    writeln!(
        out,
        "{} #{} by {} received response from {} in {:.6} minutes",
        time.repo, time.number, time.author, time.reply_author, time.minutes
    )
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    let unit = summary.metric.unit();

    writeln!(out)?;
    writeln!(out, "{}", summary.metric.title())?;
    writeln!(out, "For {} issues/PRs", summary.count)?;
    writeln!(out, "    Average: {:.6} {}", summary.mean, unit)?;
    writeln!(out, "    Median: {:.6} {}", summary.median, unit)?;
    writeln!(out, "    95th Percentile: {:.6} {}", summary.p95, unit)
}

pub fn write_elapsed<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "Execution took {:.6} seconds.", elapsed.as_secs_f64())
}
