//! Error type shared by the scanner, the LaTeX state machine and file loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no opposite bracket for {0:?}")]
    NoOppositeBracket(char),

    #[error("no context found at index {0}")]
    NoContextFound(usize),

    #[error("switch to same context {context} at index {index}")]
    AdjacentSameTag { context: String, index: usize },

    #[error("unclosed bracket, expected {expected:?} before end of input")]
    UnclosedBracket { expected: char },

    #[error("content nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("input has not been scanned yet")]
    NotScanned,

    #[error("input has already been scanned")]
    AlreadyScanned,

    #[error("scan failed at {location}")]
    Located {
        location: String,
        #[source]
        source: Box<Error>,
    },

    #[error("can't read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0} is a directory, only single files can be parsed")]
    IsDirectory(PathBuf),

    #[error("can't open file {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// The innermost error, skipping every `Located` wrapper
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Located { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Locations from the outermost scan down to the failing sub-scan
    pub fn locations(&self) -> Vec<&str> {
        let mut locations = Vec::new();
        let mut current = self;
        while let Error::Located { location, source } = current {
            locations.push(location.as_str());
            current = source;
        }
        locations
    }
}
