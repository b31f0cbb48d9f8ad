use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{EditResult, StreamError};
use crate::functions::lines::{create_output, open_input, process_lines};
use crate::record::{columns, PdbLine, ResSeq};

/// A shifted residue number that no longer fits the 4-column resSeq field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub line: usize,
    pub value: i64,
}

/// Summary of a renumbering run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenumberReport {
    pub offset: i64,
    pub lines: usize,
    pub renumbered: usize,
    /// Line numbers of ATOM/HETATM records whose resSeq could not be parsed
    pub passed_through: Vec<usize>,
    pub overflows: Vec<Overflow>,
}

/// Result of renumbering a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renumbered {
    /// Line is emitted unchanged
    Unchanged,
    /// ATOM/HETATM line with a resSeq that is not an integer
    Malformed,
    /// Rewritten line together with the new residue number
    Shifted(String, i64),
}

/// Shifts the resSeq of an ATOM/HETATM line by `offset`. All other record types as well
/// as atom lines without a numeric resSeq are left alone.
pub fn renumber_line(line: &str, offset: i64) -> Renumbered {
    let pdb_line = PdbLine::new(line);

    if !pdb_line.record_type().is_atom() {
        return Renumbered::Unchanged;
    }

    match pdb_line.res_seq() {
        ResSeq::Value(old) => {
            let new = old.saturating_add(offset);
            Renumbered::Shifted(pdb_line.with_res_seq(new), new)
        }
        ResSeq::Blank | ResSeq::Malformed(_) => Renumbered::Malformed,
    }
}

fn fits_field(value: i64) -> bool {
    value.to_string().len() <= columns::RES_SEQ_WIDTH
}

/// Renumbers every line read from `reader` and writes the result to `writer`.
pub fn renumber_stream<R, W>(reader: R, mut writer: W, offset: i64) -> Result<RenumberReport, StreamError>
where
    R: BufRead,
    W: Write,
{
    let mut report = RenumberReport {
        offset,
        ..Default::default()
    };

    process_lines(reader, &mut writer, |line, line_no, out| {
        report.lines += 1;
        match renumber_line(line, offset) {
            Renumbered::Shifted(new_line, value) => {
                if !fits_field(value) {
                    log::warn!(
                        "Residue number {} on line {} exceeds the 4-column resSeq field",
                        value,
                        line_no
                    );
                    report.overflows.push(Overflow {
                        line: line_no,
                        value,
                    });
                }
                report.renumbered += 1;
                out.write_all(new_line.as_bytes())
            }
            Renumbered::Malformed => {
                log::debug!("Line {} has no numeric resSeq, passing through", line_no);
                report.passed_through.push(line_no);
                out.write_all(line.as_bytes())
            }
            Renumbered::Unchanged => out.write_all(line.as_bytes()),
        }
    })?;

    log::info!(
        "Renumbered {} of {} lines by {}",
        report.renumbered,
        report.lines,
        offset
    );
    Ok(report)
}

/// Adds `offset` to the residue sequence number of every ATOM/HETATM record in
/// `input` and writes the complete file to `output`.
pub fn renumber(input: &Path, output: &Path, offset: i64) -> EditResult<RenumberReport> {
    let reader = open_input(input)?;
    let writer = create_output(output)?;

    renumber_stream(reader, writer, offset).map_err(|e| e.at(input, output))
}
