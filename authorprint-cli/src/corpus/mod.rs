//! Corpus ingestion
//!
//! Two on-disk layouts are understood:
//! - PAN layout: a `meta-file.json` naming the candidates and unknown texts
//! - plain layout: one directory per candidate plus an `unknown/` directory
//!
//! Both hand the attribution core in-memory [`Candidate`]s and [`Document`]s.

mod directory;
mod pan;

pub use directory::DirectoryCorpus;
pub use pan::{PanCorpus, META_FILENAME};

use authorprint_core::{Candidate, Document};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while reading a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("corpus directory not found: {0}")]
    MissingCorpus(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {path}: {source}")]
    MetaFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown candidate '{0}'")]
    UnknownCandidate(String),
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// Source of candidate training texts and unknown documents
pub trait CorpusSource: Sync {
    /// Candidate author identifiers, in canonical order
    fn list_candidates(&self) -> CorpusResult<Vec<String>>;

    /// Unknown document identifiers, in canonical order
    fn list_unknowns(&self) -> CorpusResult<Vec<String>>;

    /// Training file identifiers of one candidate
    fn training_files(&self, author: &str) -> CorpusResult<Vec<String>>;

    fn load_training_text(&self, author: &str, file: &str) -> CorpusResult<String>;

    fn load_unknown_text(&self, doc: &str) -> CorpusResult<String>;
}

/// Open a corpus, picking the layout from the presence of a meta-file.
pub fn open(path: &Path) -> CorpusResult<Box<dyn CorpusSource>> {
    if !path.is_dir() {
        return Err(CorpusError::MissingCorpus(path.to_path_buf()));
    }
    if path.join(META_FILENAME).is_file() {
        debug!("Using PAN meta-file layout in {}", path.display());
        Ok(Box::new(PanCorpus::open(path)?))
    } else {
        debug!("No {} in {}, using directory layout", META_FILENAME, path.display());
        Ok(Box::new(DirectoryCorpus::new(path)))
    }
}

/// Load every candidate with the concatenation of its training files.
pub fn load_candidates(source: &dyn CorpusSource) -> CorpusResult<Vec<Candidate>> {
    let authors = source.list_candidates()?;
    info!("Loading training texts for {} candidates...", authors.len());

    authors
        .par_iter()
        .map(|author| -> CorpusResult<Candidate> {
            let files = source.training_files(author)?;
            if files.is_empty() {
                warn!("Candidate '{}' has no training files", author);
            }
            let texts = files
                .iter()
                .map(|file| -> CorpusResult<String> {
                    let text = source.load_training_text(author, file)?;
                    debug!("Text {}/{} read", author, file);
                    Ok(text)
                })
                .collect::<CorpusResult<Vec<String>>>()?;
            Ok(Candidate::new(author.clone(), texts))
        })
        .collect()
}

/// Load every unknown document.
pub fn load_unknowns(source: &dyn CorpusSource) -> CorpusResult<Vec<Document>> {
    let ids = source.list_unknowns()?;
    info!("Loading {} unknown texts...", ids.len());

    ids.par_iter()
        .map(|id| -> CorpusResult<Document> {
            Ok(Document::new(id.clone(), source.load_unknown_text(id)?))
        })
        .collect()
}

/// Read a text file. Invalid UTF-8 is replaced rather than rejected.
pub(crate) fn read_text(path: &Path) -> CorpusResult<String> {
    let bytes = std::fs::read(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!("{} is not valid UTF-8, replacing invalid bytes", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Names of the visible regular files directly inside `dir`, sorted.
pub(crate) fn list_files(dir: &Path) -> CorpusResult<Vec<String>> {
    list_entries(dir, |ft| ft.is_file())
}

/// Names of the visible subdirectories of `dir`, sorted.
pub(crate) fn list_dirs(dir: &Path) -> CorpusResult<Vec<String>> {
    list_entries(dir, |ft| ft.is_dir())
}

fn list_entries(dir: &Path, keep: impl Fn(&std::fs::FileType) -> bool) -> CorpusResult<Vec<String>> {
    let io_err = |source| CorpusError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_type = entry.file_type().map_err(io_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if keep(&file_type) && !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_open_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(open(&missing), Err(CorpusError::MissingCorpus(_))));
    }

    #[test]
    fn test_open_picks_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("alice")).unwrap();
        fs::write(dir.path().join("alice/known1.txt"), "hello there").unwrap();
        fs::create_dir(dir.path().join("unknown")).unwrap();
        fs::write(dir.path().join("unknown/u1.txt"), "who wrote this").unwrap();

        let source = open(dir.path()).unwrap();
        assert_eq!(source.list_candidates().unwrap(), vec!["alice"]);

        fs::write(
            dir.path().join(META_FILENAME),
            r#"{"folder": "unknown", "candidate-authors": [{"author-name": "alice"}],
                "unknown-texts": [{"unknown-text": "u1.txt"}]}"#,
        )
        .unwrap();
        let source = open(dir.path()).unwrap();
        assert_eq!(source.list_unknowns().unwrap(), vec!["u1.txt"]);
    }

    #[test]
    fn test_load_candidates_concatenates_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bob")).unwrap();
        fs::write(dir.path().join("bob/b.txt"), "second").unwrap();
        fs::write(dir.path().join("bob/a.txt"), "first").unwrap();
        fs::write(dir.path().join("bob/.hidden"), "ignored").unwrap();
        fs::create_dir_all(dir.path().join("unknown")).unwrap();

        let source = DirectoryCorpus::new(dir.path());
        let candidates = load_candidates(&source).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].author(), "bob");
        assert_eq!(candidates[0].text(), "firstsecond");
    }

    #[test]
    fn test_read_text_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9 au lait").unwrap();
        let text = read_text(&path).unwrap();
        assert!(text.starts_with("caf"));
        assert!(text.ends_with(" au lait"));
    }
}
