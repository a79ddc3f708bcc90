//! Topic corpus: the precomputed `{ "topics": [...] }` document queries are
//! matched against.
//!
//! Loading validates each entry individually. A bad entry becomes a
//! [`CorpusWarning`] and is left out; only a document that cannot be read or
//! parsed at all fails the load.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SkemiError};
use crate::search::EMBEDDING_DIM;

pub mod builder;
pub mod loader;

pub use builder::{LabeledSample, add_sample, build_corpus, load_dataset};
pub use loader::{CorpusLoader, CorpusSource};

/// One named topic and its precomputed embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub name: String,
    pub vector: Vec<f64>,
}

impl TopicRecord {
    pub fn new(name: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            vector,
        }
    }
}

/// Ordered, read-only collection of topics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicCorpus {
    topics: Vec<TopicRecord>,
}

impl TopicCorpus {
    pub const fn new(topics: Vec<TopicRecord>) -> Self {
        Self { topics }
    }

    pub fn topics(&self) -> &[TopicRecord] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.name.as_str())
    }

    /// Parse a corpus document, collecting a warning for every unusable entry.
    pub fn from_json_str(raw: &str) -> Result<LoadedCorpus> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| SkemiError::CorpusUnavailable(format!("parse corpus: {err}")))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<LoadedCorpus> {
        let entries = value
            .get("topics")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SkemiError::InvalidCorpus("document has no \"topics\" array".to_string())
            })?;

        let mut topics = Vec::with_capacity(entries.len());
        let mut warnings = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            match parse_entry(entry) {
                Ok(record) => topics.push(record),
                Err(problem) => {
                    let name = entry
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    tracing::warn!(index, name = ?name, %problem, "skipping corpus entry");
                    warnings.push(CorpusWarning {
                        index,
                        name,
                        problem,
                    });
                }
            }
        }

        Ok(LoadedCorpus {
            corpus: Self::new(topics),
            warnings,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A parsed corpus together with the entries that were dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub corpus: TopicCorpus,
    pub warnings: Vec<CorpusWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusWarning {
    pub index: usize,
    pub name: Option<String>,
    pub problem: EntryProblem,
}

impl fmt::Display for CorpusWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "topic #{} ({name}): {}", self.index, self.problem),
            None => write!(f, "topic #{}: {}", self.index, self.problem),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryProblem {
    NotAnObject,
    MissingName,
    MissingVector,
    NonNumeric { position: usize },
    WrongLength { actual: usize },
}

impl fmt::Display for EntryProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("entry is not an object"),
            Self::MissingName => f.write_str("missing string \"name\""),
            Self::MissingVector => f.write_str("missing \"vector\" array"),
            Self::NonNumeric { position } => {
                write!(f, "vector component {position} is not a number")
            }
            Self::WrongLength { actual } => {
                write!(f, "vector has {actual} components, expected {EMBEDDING_DIM}")
            }
        }
    }
}

fn parse_entry(entry: &Value) -> std::result::Result<TopicRecord, EntryProblem> {
    let object = entry.as_object().ok_or(EntryProblem::NotAnObject)?;
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or(EntryProblem::MissingName)?;
    let raw = object
        .get("vector")
        .and_then(Value::as_array)
        .ok_or(EntryProblem::MissingVector)?;

    let vector = raw
        .iter()
        .enumerate()
        .map(|(position, x)| x.as_f64().ok_or(EntryProblem::NonNumeric { position }))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if vector.len() != EMBEDDING_DIM {
        return Err(EntryProblem::WrongLength {
            actual: vector.len(),
        });
    }

    Ok(TopicRecord::new(name, vector))
}
