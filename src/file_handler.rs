//! Loading LaTeX sources from files or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Path that stands for stdin on the command line
pub const STDIN_PATH: &str = "-";

/// A loaded source and the name it is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

/// Find the file a name refers to.
///
/// The order is:
/// - file.tex - must be as named
/// - file     - try it as is
/// - file     - add .tex and try it
pub fn tex_path(filename: &str) -> Result<PathBuf, Error> {
    let path = Path::new(filename);

    if path.is_dir() {
        return Err(Error::IsDirectory(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if path.extension().is_none_or(|ext| ext != "tex") {
        let tex_path = path.with_extension("tex");
        if tex_path.is_file() {
            return Ok(tex_path);
        }
    }

    Err(Error::NotFound(path.to_path_buf()))
}

/// Read a LaTeX source, `-` meaning stdin
pub fn read_source(filename: &str) -> Result<SourceFile, Error> {
    if filename == STDIN_PATH {
        return read_stdin();
    }

    let path = tex_path(filename)?;
    log::debug!("reading {}", path.display());
    let content = fs::read_to_string(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;

    Ok(SourceFile {
        name: path.to_string_lossy().to_string(),
        content,
    })
}

fn read_stdin() -> Result<SourceFile, Error> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(|source| Error::Read {
            path: PathBuf::from("<stdin>"),
            source,
        })?;

    Ok(SourceFile {
        name: "<stdin>".to_string(),
        content,
    })
}
