use std::io::{self, Write};

use minefield_core::MinePeak;
use minefield_system_ranking::Ranking;
use serde::Serialize;

/// Output formats supported by the command-line adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// One human-readable line per mine.
    Text,
    /// A single JSON document.
    Json,
}

/// Ranked mines selected for presentation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Report {
    winners: Vec<ReportEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    others: Vec<ReportEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
struct ReportEntry {
    rank: usize,
    id: u32,
    x: f32,
    y: f32,
    peak_time: u32,
    peak_explosions: u32,
}

impl ReportEntry {
    fn new(rank: usize, mine: &MinePeak) -> Self {
        Self {
            rank,
            id: mine.id.get(),
            x: mine.position.x(),
            y: mine.position.y(),
            peak_time: mine.peak.time(),
            peak_explosions: mine.peak.explosions(),
        }
    }

    fn write_line<W: Write>(&self, label: &str, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{label} ({}): Mine ID={}, X={:.6}, Y={:.6}, Peak Time={}, Peak Explosions={}",
            self.rank, self.id, self.x, self.y, self.peak_time, self.peak_explosions
        )
    }
}

/// Builds the report from a ranking.
///
/// Only the winners are included unless `include_all` is set, in which case
/// the remaining mines follow in rank order.
pub(crate) fn build_report(ranking: &Ranking, include_all: bool) -> Report {
    let mut entries = ranking
        .ordered()
        .iter()
        .enumerate()
        .map(|(rank, mine)| ReportEntry::new(rank, mine));

    let winners = entries.by_ref().take(ranking.winners().len()).collect();
    let others = if include_all {
        entries.collect()
    } else {
        Vec::new()
    };

    Report { winners, others }
}

/// Writes the report in the requested format.
pub(crate) fn write_report<W: Write>(
    report: &Report,
    format: OutputFormat,
    out: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in &report.winners {
                entry.write_line("Winner", out)?;
            }
            for entry in &report.others {
                entry.write_line("Mine", out)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
