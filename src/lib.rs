//! This crate provides two command line utilities for editing PDB files on the text level.
//! Only the residue sequence number columns are ever rewritten and whole ATOM/HETATM
//! records are ever removed, everything else is copied byte for byte.
//!
//! # Example usage:
//! Shift all residue numbers by 250:
//!
//! `pdb-renumber structure.pdb renumbered.pdb 250`
//!
//! Shift them back:
//!
//! `pdb-renumber renumbered.pdb structure.pdb -250`
//!
//! Remove residues 10 to 150 of chain A and close the remaining chain with TER/END:
//!
//! `pdb-trim -i structure.pdb -o trimmed.pdb -s 10 -e 150 -c A`
//!
//! Records other than ATOM/HETATM/TER are only kept by `pdb-trim` if they are on the
//! pass-through list (REMARK, MODEL, ENDMDL, CRYST1, MASTER and END). Further record types
//! can be kept with `-k`, e.g. `-k HEADER`.

#[macro_use]
extern crate clap;

#[macro_use]
extern crate prettytable;

pub mod error;
pub mod functions;
pub mod options;
pub mod record;

pub use error::{EditError, EditResult, StreamError};
pub use functions::{renumber, trim, RenumberReport, TrimConfig, TrimReport};
pub use record::{PdbLine, RecordType, ResSeq};
