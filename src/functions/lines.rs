use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{EditError, EditResult, StreamError};

/// Opens the input PDB file for buffered reading.
pub fn open_input(path: &Path) -> EditResult<BufReader<File>> {
    log::debug!("Opening input {}", path.display());
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| EditError::open_input(path, e))
}

/// Creates or truncates the output PDB file.
pub fn create_output(path: &Path) -> EditResult<BufWriter<File>> {
    log::debug!("Creating output {}", path.display());
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| EditError::write(path, e))
}

/// Feeds every line of `reader`, terminator included, together with its 1-based
/// line number to `handle`, which writes whatever it wants to keep. The writer is
/// flushed once the input is exhausted.
pub fn process_lines<R, W, F>(mut reader: R, writer: &mut W, mut handle: F) -> Result<(), StreamError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str, usize, &mut W) -> io::Result<()>,
{
    let mut buf = String::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_line(&mut buf).map_err(StreamError::Read)? == 0 {
            break;
        }
        line_no += 1;
        handle(&buf, line_no, writer).map_err(StreamError::Write)?;
    }

    writer.flush().map_err(StreamError::Write)
}
