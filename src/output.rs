//! Output formatting for hotspot reports

use crate::index::build::CorpusSummary;
use crate::index::types::Hotspot;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Hotspots found in one candidate password
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub candidate: String,
    pub hotspots: Vec<Hotspot>,
}

fn color_choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print reports as coloured text on stdout
pub fn print_reports(reports: &[CheckReport], color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        write_report(&mut stdout, report)?;
    }

    Ok(())
}

/// Print reports as pretty JSON on stdout
pub fn print_json(reports: &[CheckReport]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, reports)?;
    writeln!(lock)?;
    Ok(())
}

/// Render one report.
///
/// The header names the candidate; each hotspot line shows corpus counters and
/// where the n-gram sits in the candidate.
pub fn write_report<W: WriteColor>(out: &mut W, report: &CheckReport) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(out, "{}", report.candidate)?;
    out.reset()?;

    let count = report.hotspots.len();
    writeln!(out, " ({} hotspot{})", count, if count == 1 { "" } else { "s" })?;

    let width = report
        .hotspots
        .iter()
        .map(|h| h.ngram.chars().count())
        .max()
        .unwrap_or(0);

    for h in &report.hotspots {
        write!(out, "  ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", h.ngram)?;
        out.reset()?;

        let pad = width - h.ngram.chars().count();
        write!(
            out,
            "{:pad$}  freq={} docFreq={} begin={} middle={} end={}",
            "",
            h.freq,
            h.doc_freq,
            h.begin_count,
            h.middle_count,
            h.end_count,
            pad = pad
        )?;

        let tags = candidate_tags(h);
        if !tags.is_empty() {
            write!(out, "  ")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, "[{}]", tags.join(", "))?;
            out.reset()?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn candidate_tags(h: &Hotspot) -> Vec<String> {
    let mut tags = Vec::new();
    if h.candidate_at_begin {
        tags.push("begin".to_string());
    }
    if h.candidate_middle_count > 0 {
        tags.push(format!("middle x{}", h.candidate_middle_count));
    }
    if h.candidate_at_end {
        tags.push("end".to_string());
    }
    tags
}

/// Print a corpus summary
pub fn print_summary(source: &str, summary: &CorpusSummary) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Corpus Statistics")?;
    writeln!(stdout, "=================")?;
    writeln!(stdout)?;
    writeln!(stdout, "Corpus:            {}", source)?;
    writeln!(stdout, "Passwords indexed: {}", summary.passwords)?;
    writeln!(stdout, "Lines skipped:     {}", summary.skipped)?;
    writeln!(stdout, "Invalid UTF-8:     {}", summary.invalid_utf8)?;
    writeln!(stdout, "Distinct n-grams:  {}", summary.ngrams)?;
    writeln!(stdout, "Trie nodes:        {}", summary.nodes)?;
    Ok(())
}
