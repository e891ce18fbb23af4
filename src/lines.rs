//! Line-by-line readers, used to source node values from text.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Whether the delimiter stays at the end of each line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strip {
    Delimiter,
    Keep,
}

impl Default for Strip {
    fn default() -> Self {
        Strip::Delimiter
    }
}

#[inline]
fn strip_line(line: &[u8], delimiter: u8, strip: Strip) -> &[u8] {
    match (strip, line.split_last()) {
        (Strip::Delimiter, Some((&last, rest))) if last == delimiter => rest,
        _ => line,
    }
}

/// Reads delimited lines from a buffered byte stream.
///
/// The reader is its own iterator and only moves forward; reading a source again needs a fresh reader. A last
/// line without a trailing delimiter is still returned, and an empty stream returns no lines at all.
pub struct LineReader<R> {
    reader: R,
    delimiter: u8,
    strip: Strip,
}

impl<R: BufRead> LineReader<R> {
    /// Read `\n`-terminated lines, stripping the `\n`.
    pub fn new(reader: R) -> LineReader<R> {
        LineReader::with_delimiter(reader, b'\n', Strip::Delimiter)
    }

    pub fn with_delimiter(reader: R, delimiter: u8, strip: Strip) -> LineReader<R> {
        LineReader {
            reader,
            delimiter,
            strip,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl LineReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<LineReader<BufReader<File>>> {
        Ok(LineReader::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        match self.reader.read_until(self.delimiter, &mut line) {
            Ok(0) => None,
            Ok(_) => {
                let len = strip_line(&line, self.delimiter, self.strip).len();
                line.truncate(len);
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Reads delimited lines out of bytes that are already in memory, such as a memory-mapped file.
///
/// Lines borrow from the input, nothing is copied. The line semantics are those of [`LineReader`].
#[derive(Clone, Debug)]
pub struct SliceLineReader<'a> {
    remaining: &'a [u8],
    delimiter: u8,
    strip: Strip,
}

impl<'a> SliceLineReader<'a> {
    pub fn new(data: &'a [u8]) -> SliceLineReader<'a> {
        SliceLineReader::with_delimiter(data, b'\n', Strip::Delimiter)
    }

    pub fn with_delimiter(data: &'a [u8], delimiter: u8, strip: Strip) -> SliceLineReader<'a> {
        SliceLineReader {
            remaining: data,
            delimiter,
            strip,
        }
    }

    /// The bytes that haven't been returned as lines yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }
}

impl<'a> Iterator for SliceLineReader<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.remaining.is_empty() {
            return None;
        }
        let end = match memchr::memchr(self.delimiter, self.remaining) {
            Some(pos) => pos + 1,
            None => self.remaining.len(),
        };
        let (line, rest) = self.remaining.split_at(end);
        self.remaining = rest;
        Some(strip_line(line, self.delimiter, self.strip))
    }
}
