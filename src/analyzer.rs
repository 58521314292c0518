//! Generic line-by-line log analyzer
//!
//! An [`Analyzer`] pairs one [`LineMatcher`] with the ordered records it
//! produced. Records are kept in file order and never re-sorted or mutated.

use crate::matcher::{AppCreationMatcher, LineMatcher, ScreenStateMatcher};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that end an analyzer run
///
/// Only failure to open or read the file is fatal. Lines that do not match
/// are skipped silently and undecodable bytes are replaced.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("File {} not found", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnalyzeError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            AnalyzeError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AnalyzeError::Unreadable {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for analyzer runs
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// Accumulates the records one matcher extracts from a log
pub struct Analyzer<M: LineMatcher> {
    matcher: M,
    records: Vec<M::Record>,
}

/// Analyzer for `on_ui_create` app creation events
pub type AppIdAnalyzer = Analyzer<AppCreationMatcher>;

/// Analyzer for screen state transitions
pub type ScreenStateAnalyzer = Analyzer<ScreenStateMatcher>;

impl<M: LineMatcher + Default> Default for Analyzer<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: LineMatcher> Analyzer<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            records: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.matcher.name()
    }

    /// Scan the file at `path` and return the matched records in file order
    ///
    /// Previous records are discarded. On error the record list is left empty.
    pub fn analyze<P: AsRef<Path>>(&mut self, path: P) -> Result<&[M::Record]> {
        let path = path.as_ref();
        self.records.clear();

        let file = File::open(path).map_err(|e| {
            tracing::warn!("{}: cannot open {}: {}", self.name(), path.display(), e);
            AnalyzeError::from_io(path, e)
        })?;

        match self.scan(BufReader::new(file)) {
            Ok(lines) => {
                tracing::debug!(
                    "{}: {} of {} lines matched in {}",
                    self.name(),
                    self.records.len(),
                    lines,
                    path.display()
                );
                Ok(&self.records)
            }
            Err(e) => {
                tracing::warn!("{}: read of {} failed: {}", self.name(), path.display(), e);
                self.records.clear();
                Err(AnalyzeError::from_io(path, e))
            }
        }
    }

    /// Same as [`Analyzer::analyze`] over an already-open reader
    pub fn analyze_reader<R: BufRead>(&mut self, reader: R) -> io::Result<&[M::Record]> {
        self.records.clear();
        if let Err(e) = self.scan(reader) {
            self.records.clear();
            return Err(e);
        }
        Ok(&self.records)
    }

    /// Feed every line to the matcher, returning the number of lines read
    fn scan<R: BufRead>(&mut self, mut reader: R) -> io::Result<usize> {
        let mut buf = Vec::new();
        let mut lines = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            // `\n`, `\r\n` and a bare `\r` each end one line
            let chunk = String::from_utf8_lossy(&buf);
            let chunk = chunk.strip_suffix('\n').unwrap_or(&chunk);
            let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
            for line in chunk.split('\r') {
                lines += 1;
                if let Some(record) = self.matcher.match_line(line) {
                    self.records.push(record);
                }
            }
        }

        Ok(lines)
    }

    /// Records from the last run, in arrival order
    pub fn records(&self) -> &[M::Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<M::Record> {
        self.records
    }

    /// Compute summary statistics over the current records
    pub fn summarize(&self) -> M::Summary {
        self.matcher.summarize(&self.records)
    }
}
