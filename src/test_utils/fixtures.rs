use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use crate::corpus::{LabeledSample, TopicCorpus, TopicRecord};
use crate::search::HashEmbedder;

/// Isolated directory holding corpus, dataset and config files for a test.
pub struct CorpusFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl CorpusFixture {
    /// # Panics
    /// If the temp directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// # Panics
    /// If the file cannot be written.
    #[must_use]
    pub fn write(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    /// Write a corpus whose topic vectors are the embeddings of `(name, text)`.
    ///
    /// # Panics
    /// If the corpus cannot be serialized or written.
    #[must_use]
    pub fn write_corpus(&self, relative_path: &str, topics: &[(&str, &str)]) -> PathBuf {
        let embedder = HashEmbedder::default();
        let corpus = TopicCorpus::new(
            topics
                .iter()
                .map(|(name, text)| TopicRecord::new(*name, embedder.embed(text).into_vec()))
                .collect(),
        );
        self.write(
            relative_path,
            &corpus.to_json_pretty().expect("serialize corpus"),
        )
    }

    /// # Panics
    /// If the dataset cannot be written.
    #[must_use]
    pub fn write_dataset(&self, relative_path: &str, samples: &[(&str, &str)]) -> PathBuf {
        let samples: Vec<LabeledSample> = samples
            .iter()
            .map(|(text, label)| LabeledSample::new(*text, *label))
            .collect();
        self.write(relative_path, &json!(samples).to_string())
    }
}

impl Default for CorpusFixture {
    fn default() -> Self {
        Self::new()
    }
}
