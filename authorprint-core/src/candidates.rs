//! Candidate authors and the pruned candidate pool

use crate::errors::{AttributionError, AttributionResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{info, warn};

/// A text keyed by an identifier (a training file or an unknown document)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// First `length` words joined with no separator.
    pub fn excerpt(&self, length: usize) -> String {
        self.text.split_whitespace().take(length).collect()
    }
}

/// One author and the concatenation of all their training texts
#[derive(Debug, Clone)]
pub struct Candidate {
    author: String,
    text: String,
    /// Byte range of each whitespace-delimited word in `text`
    words: Vec<Range<usize>>,
}

impl Candidate {
    /// Concatenate the author's training texts as-is. A file without trailing
    /// whitespace fuses its last word with the next file's first word.
    pub fn new<I, S>(author: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: String = texts.into_iter().map(|part| part.as_ref().to_owned()).collect();
        let words = word_spans(&text);
        Self {
            author: author.into(),
            text,
            words,
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// `length` consecutive words starting at `start`, joined with no separator.
    pub fn excerpt(&self, start: usize, length: usize) -> AttributionResult<String> {
        let end = start
            .checked_add(length)
            .filter(|end| *end <= self.words.len())
            .ok_or_else(|| AttributionError::ExcerptOutOfRange {
                author: self.author.clone(),
                available: self.words.len(),
                requested: length,
            })?;
        Ok(self.words[start..end]
            .iter()
            .map(|span| &self.text[span.clone()])
            .collect())
    }

    /// A uniformly placed run of `length` words.
    pub fn random_excerpt<R: Rng + ?Sized>(
        &self,
        length: usize,
        rng: &mut R,
    ) -> AttributionResult<String> {
        if length > self.words.len() {
            return Err(AttributionError::ExcerptOutOfRange {
                author: self.author.clone(),
                available: self.words.len(),
                requested: length,
            });
        }
        let start = rng.gen_range(0..=self.words.len() - length);
        self.excerpt(start, length)
    }
}

fn word_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push(s..i);
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(s..text.len());
    }
    spans
}

/// A candidate removed before training for lack of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedCandidate {
    pub author: String,
    pub word_count: usize,
}

/// Candidates that survived pruning, in canonical (ingestion) order
#[derive(Debug, Clone)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    dropped: Vec<DroppedCandidate>,
}

impl CandidatePool {
    /// Keep candidates with at least `min_train_len` training words.
    pub fn new(candidates: impl IntoIterator<Item = Candidate>, min_train_len: usize) -> Self {
        let mut kept = Vec::new();
        let mut dropped = Vec::new();

        for candidate in candidates {
            let words = candidate.word_count();
            if words < min_train_len {
                warn!(
                    "Dropping candidate '{}': {} training words, need {}",
                    candidate.author, words, min_train_len
                );
                dropped.push(DroppedCandidate {
                    author: candidate.author,
                    word_count: words,
                });
            } else {
                kept.push(candidate);
            }
        }

        info!(
            "Candidate pool: {} kept, {} dropped",
            kept.len(),
            dropped.len()
        );

        Self {
            candidates: kept,
            dropped,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn dropped(&self) -> &[DroppedCandidate] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, author: &str) -> bool {
        self.candidates.iter().any(|c| c.author == author)
    }

    /// Smallest training word count among surviving candidates
    pub fn min_words(&self) -> Option<usize> {
        self.candidates.iter().map(Candidate::word_count).min()
    }
}
