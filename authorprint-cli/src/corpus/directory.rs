//! Plain directory corpus
//!
//! ```text
//! data/
//!   candidate2015/known0.txt ...
//!   candidate2016/known0.txt ...
//!   unknown/unknown0.txt ...
//! ```
//!
//! Every subdirectory is a candidate except the reserved ones below.

use super::{list_dirs, list_files, read_text, CorpusError, CorpusResult, CorpusSource};
use std::path::{Path, PathBuf};

/// Directory holding the documents to attribute
pub const UNKNOWN_DIR: &str = "unknown";

/// Subdirectories that are never candidates. `unknown_list` is the held-out
/// pool written by dataset preparation.
const RESERVED_DIRS: &[&str] = &[UNKNOWN_DIR, "unknown_list", "results"];

#[derive(Debug)]
pub struct DirectoryCorpus {
    root: PathBuf,
}

impl DirectoryCorpus {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn is_candidate(name: &str) -> bool {
        !RESERVED_DIRS.contains(&name)
    }
}

impl CorpusSource for DirectoryCorpus {
    fn list_candidates(&self) -> CorpusResult<Vec<String>> {
        Ok(list_dirs(&self.root)?
            .into_iter()
            .filter(|name| Self::is_candidate(name))
            .collect())
    }

    fn list_unknowns(&self) -> CorpusResult<Vec<String>> {
        let dir = self.root.join(UNKNOWN_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        list_files(&dir)
    }

    fn training_files(&self, author: &str) -> CorpusResult<Vec<String>> {
        if !Self::is_candidate(author) || !self.root.join(author).is_dir() {
            return Err(CorpusError::UnknownCandidate(author.to_string()));
        }
        list_files(&self.root.join(author))
    }

    fn load_training_text(&self, author: &str, file: &str) -> CorpusResult<String> {
        read_text(&self.root.join(author).join(file))
    }

    fn load_unknown_text(&self, doc: &str) -> CorpusResult<String> {
        read_text(&self.root.join(UNKNOWN_DIR).join(doc))
    }
}
