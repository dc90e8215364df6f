//! PAN-style corpus described by `meta-file.json`
//!
//! ```json
//! {
//!   "folder": "unknown",
//!   "language": "EN",
//!   "encoding": "UTF8",
//!   "candidate-authors": [{"author-name": "candidate00001"}],
//!   "unknown-texts": [{"unknown-text": "unknown00001.txt"}]
//! }
//! ```
//!
//! Training files are every file in `<corpus>/<author-name>/`. Unknown texts
//! live in `<corpus>/<folder>/`; `unknown-folder` is accepted for `folder`.

use super::{list_files, read_text, CorpusError, CorpusResult, CorpusSource};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const META_FILENAME: &str = "meta-file.json";

#[derive(Debug, Deserialize)]
struct MetaFile {
    #[serde(default = "default_unknown_folder", alias = "unknown-folder")]
    folder: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(rename = "candidate-authors")]
    candidate_authors: Vec<AuthorEntry>,
    #[serde(rename = "unknown-texts")]
    unknown_texts: Vec<UnknownEntry>,
}

fn default_unknown_folder() -> String {
    "unknown".to_string()
}

#[derive(Debug, Deserialize)]
struct AuthorEntry {
    #[serde(rename = "author-name")]
    author_name: String,
}

#[derive(Debug, Deserialize)]
struct UnknownEntry {
    #[serde(rename = "unknown-text")]
    unknown_text: String,
}

#[derive(Debug)]
pub struct PanCorpus {
    root: PathBuf,
    unknown_dir: PathBuf,
    candidates: Vec<String>,
    unknowns: Vec<String>,
}

impl PanCorpus {
    pub fn open(root: &Path) -> CorpusResult<Self> {
        let meta_path = root.join(META_FILENAME);
        let content = std::fs::read_to_string(&meta_path).map_err(|source| CorpusError::Io {
            path: meta_path.clone(),
            source,
        })?;
        let meta: MetaFile =
            serde_json::from_str(&content).map_err(|source| CorpusError::MetaFile {
                path: meta_path.clone(),
                source,
            })?;

        debug!(
            "Corpus language={} encoding={}",
            meta.language.as_deref().unwrap_or("?"),
            meta.encoding.as_deref().unwrap_or("?")
        );

        Ok(Self {
            root: root.to_path_buf(),
            unknown_dir: root.join(&meta.folder),
            candidates: meta
                .candidate_authors
                .into_iter()
                .map(|a| a.author_name)
                .collect(),
            unknowns: meta
                .unknown_texts
                .into_iter()
                .map(|u| u.unknown_text)
                .collect(),
        })
    }
}

impl CorpusSource for PanCorpus {
    fn list_candidates(&self) -> CorpusResult<Vec<String>> {
        Ok(self.candidates.clone())
    }

    fn list_unknowns(&self) -> CorpusResult<Vec<String>> {
        Ok(self.unknowns.clone())
    }

    fn training_files(&self, author: &str) -> CorpusResult<Vec<String>> {
        if !self.candidates.iter().any(|c| c == author) {
            return Err(CorpusError::UnknownCandidate(author.to_string()));
        }
        list_files(&self.root.join(author))
    }

    fn load_training_text(&self, author: &str, file: &str) -> CorpusResult<String> {
        read_text(&self.root.join(author).join(file))
    }

    fn load_unknown_text(&self, doc: &str) -> CorpusResult<String> {
        read_text(&self.unknown_dir.join(doc))
    }
}
