use colored::Colorize;
use itertools::Itertools;
use prettytable::{format, Table};

use crate::functions::renumber::RenumberReport;
use crate::functions::trim::{TrimConfig, TrimReport};

fn summary_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["Records", "Count"]);
    table
}

/// Tabulates the outcome of a renumbering run.
pub fn renumber_table(report: &RenumberReport) -> Table {
    let mut table = summary_table();
    table.add_row(row!["Lines read", report.lines]);
    table.add_row(row!["Renumbered", report.renumbered]);
    table.add_row(row!["Passed through", report.passed_through.len()]);
    table.add_row(row!["Overflowing resSeq", report.overflows.len()]);
    table
}

/// Tabulates the outcome of a trimming run.
pub fn trim_table(report: &TrimReport) -> Table {
    let mut table = summary_table();
    table.add_row(row!["Atoms kept", report.kept_atoms]);
    table.add_row(row!["Atoms removed", report.removed_atoms]);
    table.add_row(row!["Blank resSeq", report.blank_res_seq]);
    table.add_row(row!["Insertion codes", report.insertion_codes.len()]);
    table.add_row(row!["Orphan TER", report.orphan_ters]);
    for (tag, count) in report.dropped_records.iter() {
        let label = if tag.is_empty() { "(blank)" } else { tag.as_str() };
        table.add_row(row![format!("Dropped {}", label), count]);
    }
    table
}

/// Lines printed before the summary table of a renumbering run.
pub fn renumber_messages(report: &RenumberReport) -> Vec<String> {
    let mut messages: Vec<String> = report
        .overflows
        .iter()
        .map(|o| {
            format!(
                "{} Residue number {} on line {} exceeds 4 digits (max 9999) and widens the resSeq field.",
                "Warning:".yellow(),
                o.value.to_string().blue(),
                o.line
            )
        })
        .collect();

    messages.push(format!("\n{}", "Successfully renumbered residues.".green()));
    messages.push(format!("Offset applied: {:+}", report.offset));
    messages
}

/// Lines printed before the summary table of a trimming run.
pub fn trim_messages(report: &TrimReport, config: &TrimConfig) -> Vec<String> {
    let mut messages: Vec<String> = report
        .insertion_codes
        .iter()
        .map(|s| {
            format!(
                "{} Skipping residue with insertion code at line {}: {}",
                "Warning:".yellow(),
                s.line,
                s.text.trim()
            )
        })
        .collect();

    messages.push(format!("{}", "Successfully trimmed PDB file.".green()));
    messages.push(format!(
        "Residues REMOVED in range: {} to {}",
        config.start, config.end
    ));
    messages.push("Remaining residues (outside the range) were kept.".to_owned());
    if let Some(chain) = &config.chain_id {
        messages.push(format!("Chain processed: {}", chain));
    }
    messages.push(format!(
        "Records copied verbatim: {}",
        config.passthrough.iter().format(", ")
    ));
    if report.synthesized_ter || report.synthesized_end {
        let added = [("TER", report.synthesized_ter), ("END", report.synthesized_end)]
            .iter()
            .filter(|(_, added)| *added)
            .map(|(tag, _)| tag)
            .join(" and ");
        messages.push(format!("Appended closing {} record(s).", added));
    }
    messages
}
