use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pagemark_core::{parse_url_list, render_url_list, PageDocument};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::document::render_markdown;
use crate::filename::markdown_filename;
use crate::InputError;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("invalid output path: {0}")]
    InvalidPath(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create it and any parents if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Same name means same document slot: replace silently.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Write a document as `{dir}/{sanitized title}.md`, returning the path.
pub fn persist_document(doc: &PageDocument, dir: &Path) -> Result<PathBuf, PersistError> {
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    writer.write(&markdown_filename(&doc.title), &render_markdown(doc))
}

/// Write URLs in the list file format, creating the parent directory if the
/// path has one.
pub fn save_url_list<S: AsRef<str>>(urls: &[S], path: &Path) -> Result<PathBuf, PersistError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::InvalidPath(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    AtomicFileWriter::new(dir).write(filename, &render_url_list(urls))
}

/// Read a URL list file. Blank lines are ignored.
pub fn load_url_list(path: &Path) -> Result<Vec<String>, InputError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(parse_url_list(&raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(InputError::Missing(path.to_path_buf()))
        }
        Err(source) => Err(InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}
