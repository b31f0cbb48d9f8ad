//! Error type shared by the renumbering and trimming operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    /// Input path does not exist
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    /// Input exists but could not be opened or read
    #[error("Failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Output could not be created or written
    #[error("Failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl EditError {
    /// Classifies an error raised while opening the input file.
    pub fn open_input(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => EditError::InputNotFound(path.to_owned()),
            _ => EditError::Read {
                path: path.to_owned(),
                source,
            },
        }
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        EditError::Read {
            path: path.to_owned(),
            source,
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        EditError::Write {
            path: path.to_owned(),
            source,
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;

/// Failure while streaming lines from a reader to a writer, before any path is known.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl StreamError {
    /// Attaches the input and output paths of a file based operation.
    pub fn at(self, input: &Path, output: &Path) -> EditError {
        match self {
            StreamError::Read(source) => EditError::read(input, source),
            StreamError::Write(source) => EditError::write(output, source),
        }
    }
}
