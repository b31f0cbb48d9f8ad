use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{EditResult, StreamError};
use crate::functions::lines::{create_output, open_input, process_lines};
use crate::record::{ter_record, PdbLine, RecordType, ResSeq};

/// Record types that survive trimming untouched unless configured otherwise.
/// HEADER is not part of this list.
pub const DEFAULT_PASSTHROUGH: [RecordType; 6] = [
    RecordType::Remark,
    RecordType::Model,
    RecordType::Endmdl,
    RecordType::Cryst1,
    RecordType::Master,
    RecordType::End,
];

/// Residue range to remove together with the optional chain it is restricted to and
/// the record types that are copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimConfig {
    pub start: i64,
    pub end: i64,
    pub chain_id: Option<String>,
    pub passthrough: Vec<RecordType>,
}

impl TrimConfig {
    pub fn new(start: i64, end: i64, chain_id: Option<String>) -> TrimConfig {
        TrimConfig {
            start,
            end,
            chain_id,
            passthrough: DEFAULT_PASSTHROUGH.to_vec(),
        }
    }

    /// Adds a record type to the pass-through list.
    pub fn keep_record(mut self, record: RecordType) -> TrimConfig {
        if !self.passthrough.contains(&record) {
            self.passthrough.push(record)
        }
        self
    }

    fn in_scope(&self, chain: &str) -> bool {
        self.chain_id.as_deref().map_or(true, |c| c == chain)
    }

    /// True if an atom of `chain` with residue number `res_seq` has to go.
    /// An empty range (start > end) never removes anything.
    pub fn removes(&self, chain: &str, res_seq: i64) -> bool {
        self.in_scope(chain) && (self.start..=self.end).contains(&res_seq)
    }
}

/// An ATOM/HETATM line dropped because its resSeq is not an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub text: String,
}

/// Summary of a trimming run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimReport {
    pub kept_atoms: usize,
    pub removed_atoms: usize,
    pub blank_res_seq: usize,
    pub insertion_codes: Vec<SkippedLine>,
    pub orphan_ters: usize,
    /// Record tags not on the pass-through list and how often they were dropped
    pub dropped_records: BTreeMap<String, usize>,
    pub synthesized_ter: bool,
    pub synthesized_end: bool,
}

/// Line filter for trimming. Lines are judged one at a time; only the state needed to
/// close the file properly (last kept record, TER for the last kept atom) is retained.
#[derive(Debug)]
pub struct RangeTrimmer<'c> {
    config: &'c TrimConfig,
    last_kept: Option<RecordType>,
    last_is_end: bool,
    last_unterminated: bool,
    /// TER record for the most recently kept atom line
    pending_ter: Option<String>,
    ter_after_atom: bool,
    report: TrimReport,
}

impl<'c> RangeTrimmer<'c> {
    pub fn new(config: &'c TrimConfig) -> RangeTrimmer<'c> {
        RangeTrimmer {
            config,
            last_kept: None,
            last_is_end: false,
            last_unterminated: false,
            pending_ter: None,
            ter_after_atom: false,
            report: TrimReport::default(),
        }
    }

    /// Decides whether `line` is kept.
    pub fn keep(&mut self, line: &str, line_no: usize) -> bool {
        let pdb_line = PdbLine::new(line);
        let record = pdb_line.record_type();

        let keep = match &record {
            r if r.is_atom() => self.keep_atom(&pdb_line, line_no),
            RecordType::Ter => {
                let follows_atom = matches!(&self.last_kept, Some(r) if r.is_atom());
                if follows_atom {
                    self.ter_after_atom = true;
                } else {
                    log::debug!("Dropping orphan TER on line {}", line_no);
                    self.report.orphan_ters += 1;
                }
                follows_atom
            }
            r if self.config.passthrough.contains(r) => true,
            other => {
                *self
                    .report
                    .dropped_records
                    .entry(other.to_string())
                    .or_insert(0) += 1;
                false
            }
        };

        if keep {
            self.last_is_end = pdb_line.content().trim() == "END";
            self.last_unterminated = pdb_line.terminator().is_empty();
            self.last_kept = Some(record);
        }
        keep
    }

    fn keep_atom(&mut self, pdb_line: &PdbLine, line_no: usize) -> bool {
        match pdb_line.res_seq() {
            ResSeq::Blank => {
                self.report.blank_res_seq += 1;
                false
            }
            ResSeq::Malformed(raw) => {
                log::warn!("Skipping residue '{}' with insertion code on line {}", raw, line_no);
                self.report.insertion_codes.push(SkippedLine {
                    line: line_no,
                    text: pdb_line.content().to_owned(),
                });
                false
            }
            ResSeq::Value(res_seq) => {
                if self.config.removes(pdb_line.chain_id(), res_seq) {
                    self.report.removed_atoms += 1;
                    false
                } else {
                    self.report.kept_atoms += 1;
                    self.pending_ter = Some(ter_record(pdb_line));
                    self.ter_after_atom = false;
                    true
                }
            }
        }
    }

    /// Returns the records needed to close the output (TER and/or END, possibly
    /// nothing) together with the final report.
    pub fn finish(mut self) -> (String, TrimReport) {
        let mut closing = String::new();

        if self.last_kept.is_some() && !self.last_is_end {
            if self.last_unterminated {
                closing.push('\n');
            }
            if let Some(ter) = self.pending_ter.take().filter(|_| !self.ter_after_atom) {
                closing.push_str(&ter);
                closing.push('\n');
                self.report.synthesized_ter = true;
            }
            closing.push_str("END\n");
            self.report.synthesized_end = true;
        }

        (closing, self.report)
    }
}

/// Trims every line read from `reader` according to `config` and writes the kept
/// lines plus any closing records to `writer`.
pub fn trim_stream<R, W>(reader: R, mut writer: W, config: &TrimConfig) -> Result<TrimReport, StreamError>
where
    R: BufRead,
    W: Write,
{
    let mut trimmer = RangeTrimmer::new(config);

    process_lines(reader, &mut writer, |line, line_no, out| {
        if trimmer.keep(line, line_no) {
            out.write_all(line.as_bytes())?;
        }
        Ok(())
    })?;

    let (closing, report) = trimmer.finish();
    writer
        .write_all(closing.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(StreamError::Write)?;

    log::info!(
        "Kept {} and removed {} atom records",
        report.kept_atoms,
        report.removed_atoms
    );
    Ok(report)
}

/// Removes the residues `config.start..=config.end` (optionally only in
/// `config.chain_id`) from `input` and writes the remaining structure to `output`.
pub fn trim(input: &Path, output: &Path, config: &TrimConfig) -> EditResult<TrimReport> {
    let reader = open_input(input)?;
    let writer = create_output(output)?;

    trim_stream(reader, writer, config).map_err(|e| e.at(input, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn trim_str(input: &str, config: &TrimConfig) -> (String, TrimReport) {
        let mut out = Vec::new();
        let report = trim_stream(input.as_bytes(), &mut out, config).unwrap();
        (String::from_utf8(out).unwrap(), report)
    }

    fn atoms(pdb: &str) -> Vec<PdbLine> {
        pdb.lines()
            .map(PdbLine::new)
            .filter(|l| l.record_type().is_atom())
            .collect()
    }

    fn residues(pdb: &str) -> Vec<i64> {
        let mut res: Vec<i64> = atoms(pdb)
            .iter()
            .filter_map(|l| match l.res_seq() {
                ResSeq::Value(v) => Some(v),
                _ => None,
            })
            .collect();
        res.dedup();
        res
    }

    fn last_two(pdb: &str) -> Vec<RecordType> {
        let lines: Vec<_> = pdb.lines().map(|l| PdbLine::new(l).record_type()).collect();
        lines[lines.len() - 2..].to_vec()
    }

    #[test]
    fn removes_range_in_chain() {
        let pdb = fs::read_to_string("tests/chain_a.pdb").unwrap();
        let (out, report) = trim_str(&pdb, &TrimConfig::new(5, 10, Some("A".to_owned())));

        let expected: Vec<i64> = (1..=4).chain(11..=20).collect();
        assert_eq!(residues(&out), expected);
        assert_eq!(report.removed_atoms, 12);
        assert_eq!(report.kept_atoms, 28);
        assert_eq!(last_two(&out), vec![RecordType::Ter, RecordType::End]);
        assert!(!report.synthesized_ter && !report.synthesized_end);
    }

    #[test]
    fn header_dropped_by_default() {
        let pdb = fs::read_to_string("tests/chain_a.pdb").unwrap();
        let (out, report) = trim_str(&pdb, &TrimConfig::new(5, 10, None));

        assert!(!out.contains("HEADER"));
        assert!(out.starts_with("REMARK"));
        assert_eq!(report.dropped_records.get("HEADER"), Some(&1));
    }

    #[test]
    fn other_chain_untouched() {
        let pdb = fs::read_to_string("tests/chain_a.pdb").unwrap();
        let config = TrimConfig::new(5, 10, Some("B".to_owned()));
        let (out, report) = trim_str(&pdb, &config);

        assert_eq!(residues(&out), (1..=20).collect::<Vec<_>>());
        assert_eq!(report.removed_atoms, 0);
        assert_eq!(last_two(&out), vec![RecordType::Ter, RecordType::End]);

        let (out, _) = trim_str(&pdb, &config.keep_record(RecordType::Header));
        assert_eq!(out, pdb);
    }

    #[test]
    fn closing_records_synthesized() {
        let pdb = fs::read_to_string("tests/chain_a_short.pdb").unwrap();
        let (out, report) = trim_str(&pdb, &TrimConfig::new(4, 5, None));

        assert_eq!(residues(&out), vec![1, 2, 3]);
        assert!(report.synthesized_ter && report.synthesized_end);

        let last_atom = *atoms(&out).last().unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[lines.len() - 2], ter_record(&last_atom));
        assert_eq!(lines[lines.len() - 1], "END");
    }

    #[test]
    fn existing_ter_is_not_duplicated() {
        let pdb = fs::read_to_string("tests/chain_a.pdb").unwrap();
        let without_end: String = pdb
            .lines()
            .filter(|l| *l != "END")
            .map(|l| format!("{}\n", l))
            .collect();
        let (out, report) = trim_str(&without_end, &TrimConfig::new(5, 10, None));

        assert!(!report.synthesized_ter);
        assert!(report.synthesized_end);
        assert_eq!(out.lines().filter(|l| l.starts_with("TER")).count(), 1);
        assert_eq!(last_two(&out), vec![RecordType::Ter, RecordType::End]);
    }

    #[test]
    fn orphan_ter_dropped() {
        let pdb = fs::read_to_string("tests/two_chains.pdb").unwrap();
        let (out, report) = trim_str(&pdb, &TrimConfig::new(1, 8, Some("A".to_owned())));

        assert!(atoms(&out).iter().all(|l| l.chain_id() != "A"));
        assert_eq!(report.orphan_ters, 1);
        assert_eq!(
            out.lines().filter(|l| l.starts_with("TER")).count(),
            pdb.lines().filter(|l| l.starts_with("TER")).count() - 1
        );
    }

    #[test]
    fn insertion_code_dropped() {
        let pdb = fs::read_to_string("tests/two_chains.pdb").unwrap();
        let (out, report) = trim_str(&pdb, &TrimConfig::new(3, 5, None));

        assert!(!out.contains("100A"));
        assert_eq!(report.insertion_codes.len(), 1);
        assert!(report.insertion_codes[0].text.contains("100A"));
    }

    #[test]
    fn trimmed_atoms_match_range() {
        let pdb = fs::read_to_string("tests/two_chains.pdb").unwrap();
        let configs = [
            TrimConfig::new(3, 5, None),
            TrimConfig::new(2, 6, Some("B".to_owned())),
            TrimConfig::new(-10, 1, Some("A".to_owned())),
            TrimConfig::new(200, 300, Some("W".to_owned())),
        ];

        for config in configs.iter() {
            let (out, _) = trim_str(&pdb, config);
            let kept: Vec<&str> = atoms(&out).iter().map(|l| l.content()).collect();

            for line in atoms(&pdb) {
                let res_seq = match line.res_seq() {
                    ResSeq::Value(v) => v,
                    _ => continue,
                };
                let removed = config.removes(line.chain_id(), res_seq);
                assert_eq!(!removed, kept.contains(&line.content()), "{:?}", config);
            }
        }
    }

    #[test]
    fn reversed_range_removes_nothing() {
        let pdb = fs::read_to_string("tests/chain_a.pdb").unwrap();
        let (out, report) = trim_str(&pdb, &TrimConfig::new(10, 5, None));

        assert_eq!(report.removed_atoms, 0);
        assert_eq!(atoms(&out).len(), atoms(&pdb).len());
    }

    #[test]
    fn blank_chain_scope() {
        let pdb = concat!(
            "ATOM      1  CA  SER     1      12.272   5.533  -2.221  1.00  0.00           C\n",
            "ATOM      2  CA  LYS     6      13.330   5.223  -2.188  1.00  0.00           C\n",
            "ATOM      3  CA  SER A   1      15.485   5.853  -2.194  1.00  0.00           C\n",
            "ATOM      4  CA  LYS A   6      16.818   5.740  -2.773  1.00  0.00           C\n",
            "END\n",
        );
        let (out, report) = trim_str(pdb, &TrimConfig::new(1, 5, Some(String::new())));

        let kept: Vec<(&str, i64)> = atoms(&out)
            .iter()
            .filter_map(|l| match l.res_seq() {
                ResSeq::Value(v) => Some((l.chain_id(), v)),
                _ => None,
            })
            .collect();
        assert_eq!(kept, vec![("", 6), ("A", 1), ("A", 6)]);
        assert_eq!(report.removed_atoms, 1);
    }

    #[test]
    fn blank_res_seq_dropped_and_models_kept() {
        let pdb = concat!(
            "MODEL        1\n",
            "ATOM      1  CA  SER A   1      12.272   5.533  -2.221  1.00  0.00           C\n",
            "ATOM      2  CA  LYS A          13.330   5.223  -2.188  1.00  0.00           C\n",
            "ATOM      3  CA  LEU A   3      15.485   5.853  -2.194  1.00  0.00           C\n",
            "TER       4      LEU A   3\n",
            "ENDMDL\n",
            "END\n",
        );
        let (out, report) = trim_str(pdb, &TrimConfig::new(3, 3, None));

        assert_eq!(report.blank_res_seq, 1);
        assert!(report.insertion_codes.is_empty());
        assert_eq!(report.kept_atoms, 1);
        assert_eq!(report.removed_atoms, 1);
        assert_eq!(
            out,
            concat!(
                "MODEL        1\n",
                "ATOM      1  CA  SER A   1      12.272   5.533  -2.221  1.00  0.00           C\n",
                "TER       4      LEU A   3\n",
                "ENDMDL\n",
                "END\n",
            )
        );
    }

    #[test]
    fn empty_and_atomless_inputs() {
        let config = TrimConfig::new(1, 2, None);
        assert_eq!(trim_str("", &config).0, "");

        let (out, report) = trim_str("REMARK   1 NOTHING HERE\n", &config);
        assert_eq!(out, "REMARK   1 NOTHING HERE\nEND\n");
        assert!(!report.synthesized_ter);
    }

    #[test]
    fn unterminated_last_line() {
        let atom = "ATOM      1  N   MET A   1      27.340  24.430   2.614  1.00  9.67           N";
        let (out, _) = trim_str(atom, &TrimConfig::new(5, 10, None));

        assert_eq!(
            out,
            format!("{}\nTER       1      MET A   1\nEND\n", atom)
        );
    }

    #[test]
    fn file_trim() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("trimmed.pdb");
        let config = TrimConfig::new(5, 10, Some("A".to_owned()));

        let report = trim(Path::new("tests/chain_a.pdb"), &output, &config).unwrap();
        assert_eq!(report.removed_atoms, 12);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            trim_str(&fs::read_to_string("tests/chain_a.pdb").unwrap(), &config).0
        );

        let err = trim(Path::new("tests/missing.pdb"), &output, &config).unwrap_err();
        assert!(matches!(err, crate::error::EditError::InputNotFound(_)));
    }
}
