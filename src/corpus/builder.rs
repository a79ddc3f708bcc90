//! Builds a topic corpus from a labeled dataset.
//!
//! Each topic vector is the normalized sum of the embeddings of its samples,
//! produced by the same embedder used at query time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::corpus::{TopicCorpus, TopicRecord};
use crate::error::{Result, SkemiError};
use crate::search::similarity::l2_normalize;
use crate::search::{EMBEDDING_DIM, HashEmbedder};

const MIN_LABELS: usize = 2;

/// One training text and the topic it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub text: String,
    pub label: String,
}

impl LabeledSample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Read a `[{ "text": ..., "label": ... }]` dataset file.
pub fn load_dataset(path: &Path) -> Result<Vec<LabeledSample>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| SkemiError::Dataset(format!("read {}: {err}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|err| SkemiError::Dataset(format!("parse {}: {err}", path.display())))
}

/// Append one sample to a dataset file, creating the file (and its parent
/// directories) when it does not exist yet. Returns the new sample count.
pub fn add_sample(path: &Path, sample: LabeledSample) -> Result<usize> {
    if sample.text.trim().is_empty() || sample.label.trim().is_empty() {
        return Err(SkemiError::Dataset(
            "sample needs both a text and a label".to_string(),
        ));
    }

    let mut samples = if path.exists() {
        load_dataset(path)?
    } else {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Vec::new()
    };
    samples.push(sample);

    std::fs::write(path, serde_json::to_string_pretty(&samples)?)
        .map_err(|err| SkemiError::Dataset(format!("write {}: {err}", path.display())))?;
    debug!(path = %path.display(), samples = samples.len(), "sample added");
    Ok(samples.len())
}

/// Topics appear in order of first occurrence in `samples`. Labels whose
/// texts produce no tokens at all are left out. At least two distinct labels
/// are required.
pub fn build_corpus(samples: &[LabeledSample], embedder: &HashEmbedder) -> Result<TopicCorpus> {
    if samples.is_empty() {
        return Err(SkemiError::Dataset("dataset has no samples".to_string()));
    }

    let mut order: Vec<(String, Vec<f64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (position, sample) in samples.iter().enumerate() {
        let label = sample.label.trim();
        if label.is_empty() {
            return Err(SkemiError::Dataset(format!(
                "sample {position} has an empty label"
            )));
        }
        let slot = *index.entry(label.to_string()).or_insert_with(|| {
            order.push((label.to_string(), vec![0.0; EMBEDDING_DIM]));
            order.len() - 1
        });
        let embedding = embedder.embed(&sample.text);
        for (acc, x) in order[slot].1.iter_mut().zip(embedding.as_slice()) {
            *acc += x;
        }
    }

    if order.len() < MIN_LABELS {
        return Err(SkemiError::Dataset(format!(
            "need at least {MIN_LABELS} distinct labels, found {}",
            order.len()
        )));
    }

    let mut topics = Vec::with_capacity(order.len());
    for (name, mut vector) in order {
        l2_normalize(&mut vector);
        if vector.iter().all(|x| *x == 0.0) {
            warn!(topic = %name, "no tokens in any sample; topic dropped");
            continue;
        }
        topics.push(TopicRecord::new(name, vector));
    }

    debug!(samples = samples.len(), topics = topics.len(), "corpus built");
    Ok(TopicCorpus::new(topics))
}
