use std::fmt;
use std::ops::Range;

use strum_macros::{EnumString, IntoStaticStr};

/// Fixed column layout of ATOM/HETATM records as 0-based, end-exclusive byte ranges.
/// The PDB format documents these 1-based: record 1-6, serial 7-11, resName 18-20,
/// chainID 22 and resSeq 23-26.
pub mod columns {
    use std::ops::Range;

    pub const RECORD_NAME: Range<usize> = 0..6;
    pub const SERIAL: Range<usize> = 6..11;
    pub const RES_NAME: Range<usize> = 17..20;
    pub const CHAIN_ID: Range<usize> = 21..22;
    pub const RES_SEQ: Range<usize> = 22..26;

    pub const RES_SEQ_WIDTH: usize = 4;
}

/// Record type given by the first six columns of a line. Unknown tags are kept
/// as `Other` so they can still be matched against a pass-through list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordType {
    Atom,
    Hetatm,
    Ter,
    Header,
    Remark,
    Model,
    Endmdl,
    Cryst1,
    Master,
    End,
    #[strum(default)]
    Other(String),
}

impl RecordType {
    /// Parses a record tag. Surrounding whitespace is ignored and the parse never fails.
    pub fn from_tag(tag: &str) -> RecordType {
        match tag.trim().parse() {
            Ok(record) => record,
            // `Other` is the default variant, so every string parses
            Err(_) => unreachable!(),
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, RecordType::Atom | RecordType::Hetatm)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Other(tag) => f.write_str(tag),
            known => {
                let tag: &'static str = known.into();
                f.write_str(tag)
            }
        }
    }
}

/// Outcome of reading the resSeq columns of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResSeq<'a> {
    /// Columns are missing or contain only whitespace
    Blank,
    /// Columns contain something that is not an integer, e.g. an insertion code
    Malformed(&'a str),
    Value(i64),
}

/// Borrowed view of a single PDB line. The line terminator is split off on
/// construction so that column access never sees it and it can be re-attached
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdbLine<'a> {
    content: &'a str,
    terminator: &'a str,
}

impl<'a> PdbLine<'a> {
    pub fn new(line: &'a str) -> PdbLine<'a> {
        let content = line.trim_end_matches(&['\n', '\r'][..]);
        PdbLine {
            content,
            terminator: &line[content.len()..],
        }
    }

    /// Line without its terminator.
    pub fn content(&self) -> &'a str {
        self.content
    }

    /// `"\n"`, `"\r\n"` or empty for a final line without newline.
    pub fn terminator(&self) -> &'a str {
        self.terminator
    }

    /// Returns the text in `range`, clipped to the line length. Yields an empty
    /// string if the range starts past the end or cuts through a multi-byte char.
    fn field(&self, range: Range<usize>) -> &'a str {
        let end = range.end.min(self.content.len());
        self.content.get(range.start..end).unwrap_or("")
    }

    pub fn record_type(&self) -> RecordType {
        RecordType::from_tag(self.field(columns::RECORD_NAME))
    }

    pub fn serial(&self) -> &'a str {
        self.field(columns::SERIAL).trim()
    }

    pub fn res_name(&self) -> &'a str {
        self.field(columns::RES_NAME).trim()
    }

    pub fn chain_id(&self) -> &'a str {
        self.field(columns::CHAIN_ID).trim()
    }

    pub fn res_seq(&self) -> ResSeq<'a> {
        let raw = self.field(columns::RES_SEQ).trim();
        if raw.is_empty() {
            ResSeq::Blank
        } else {
            match raw.parse::<i64>() {
                Ok(value) => ResSeq::Value(value),
                Err(_) => ResSeq::Malformed(raw),
            }
        }
    }

    /// Returns the line, terminator included, with the resSeq columns replaced by
    /// `value` right-justified to the field width. A value that needs more room
    /// than the field is written in full and shifts everything after it.
    pub fn with_res_seq(&self, value: i64) -> String {
        let start = columns::RES_SEQ.start;
        let head = self.content.get(..start).unwrap_or(self.content);
        let tail = self.content.get(columns::RES_SEQ.end..).unwrap_or("");
        format!(
            "{}{:>width$}{}{}",
            head,
            value,
            tail,
            self.terminator,
            width = columns::RES_SEQ_WIDTH
        )
    }
}

/// Formats a TER record terminating the chain of the given atom line.
pub fn ter_record(atom: &PdbLine) -> String {
    format!(
        "TER   {:>5}      {:>3} {:1}{:>4}",
        atom.serial(),
        atom.res_name(),
        atom.chain_id(),
        atom.field(columns::RES_SEQ).trim()
    )
}
