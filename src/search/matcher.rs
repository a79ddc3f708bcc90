//! Nearest-topic matching by cosine similarity.
//!
//! A forward scan with strict `>` against a floor of -1: the first topic in
//! corpus order wins ties, and a topic scoring exactly -1 never wins.
//! Topics that cannot be scored are never candidates. Zero-norm vectors
//! (query or topic) have no direction, and topics with a wrong dimension or a
//! non-finite component are skipped and reported.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::corpus::TopicRecord;
use crate::search::embeddings::{EMBEDDING_DIM, EmbeddingVector, HashEmbedder};
use crate::search::similarity::{SimilarityError, cosine_similarity};

/// Initial best score; only strictly greater scores can win.
const SCORE_FLOOR: f64 = -1.0;

/// A topic together with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicMatch<'a> {
    pub topic: &'a TopicRecord,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    WrongDimension { actual: usize },
    NonFinite,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongDimension { actual } => {
                write!(f, "vector has {actual} components, expected {EMBEDDING_DIM}")
            }
            Self::NonFinite => f.write_str("vector contains a non-finite component"),
        }
    }
}

/// A corpus entry left out of scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTopic {
    pub index: usize,
    pub name: String,
    pub reason: SkipReason,
}

/// Result of matching one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchOutcome<'a> {
    pub best: Option<TopicMatch<'a>>,
    pub skipped: Vec<SkippedTopic>,
}

impl<'a> MatchOutcome<'a> {
    pub fn topic(&self) -> Option<&'a TopicRecord> {
        self.best.as_ref().map(|m| m.topic)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TopicMatcher {
    embedder: HashEmbedder,
    parallel: bool,
}

impl Default for TopicMatcher {
    fn default() -> Self {
        Self::new(HashEmbedder::default())
    }
}

impl TopicMatcher {
    pub const fn new(embedder: HashEmbedder) -> Self {
        Self {
            embedder,
            parallel: true,
        }
    }

    /// Whether [`Self::match_batch`] spreads queries over the rayon pool.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub const fn embedder(&self) -> &HashEmbedder {
        &self.embedder
    }

    /// Best topic for `text`, or `None` when nothing can be scored.
    pub fn find_closest_topic<'a>(
        &self,
        text: &str,
        topics: &'a [TopicRecord],
    ) -> Option<&'a TopicRecord> {
        self.match_topic(text, topics).topic()
    }

    pub fn match_topic<'a>(&self, text: &str, topics: &'a [TopicRecord]) -> MatchOutcome<'a> {
        let query = self.embedder.embed(text);
        self.match_vector(&query, topics)
    }

    pub fn match_vector<'a>(
        &self,
        query: &EmbeddingVector,
        topics: &'a [TopicRecord],
    ) -> MatchOutcome<'a> {
        let mut outcome = MatchOutcome::default();
        let mut best_score = SCORE_FLOOR;
        for scored in score_all(query, topics, &mut outcome.skipped) {
            if scored.score > best_score {
                best_score = scored.score;
                outcome.best = Some(scored);
            }
        }

        debug!(
            topics = topics.len(),
            skipped = outcome.skipped.len(),
            best = ?outcome.best.as_ref().map(|m| m.topic.name.as_str()),
            "match complete"
        );
        outcome
    }

    /// Up to `k` topics by descending score. Equal scores keep corpus order
    /// and scores at the floor are left out, so the first entry is always the
    /// one [`Self::find_closest_topic`] picks.
    pub fn rank_topics<'a>(
        &self,
        text: &str,
        topics: &'a [TopicRecord],
        k: usize,
    ) -> Vec<TopicMatch<'a>> {
        let query = self.embedder.embed(text);
        let mut skipped = Vec::new();
        let mut ranked = score_all(&query, topics, &mut skipped);
        ranked.retain(|m| m.score > SCORE_FLOOR);
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(k);
        ranked
    }

    /// Match many independent queries against one corpus. Output order
    /// follows `texts`.
    pub fn match_batch<'a, S>(
        &self,
        texts: &[S],
        topics: &'a [TopicRecord],
    ) -> Vec<MatchOutcome<'a>>
    where
        S: AsRef<str> + Sync,
    {
        if self.parallel {
            texts
                .par_iter()
                .map(|text| self.match_topic(text.as_ref(), topics))
                .collect()
        } else {
            texts
                .iter()
                .map(|text| self.match_topic(text.as_ref(), topics))
                .collect()
        }
    }
}

/// Closest topic using the default (ASCII) embedder.
pub fn find_closest_topic<'a>(text: &str, topics: &'a [TopicRecord]) -> Option<&'a TopicRecord> {
    TopicMatcher::default().find_closest_topic(text, topics)
}

/// Score every usable topic in corpus order. Invalid topics are pushed onto
/// `skipped`; degenerate ones are silently left out.
fn score_all<'a>(
    query: &EmbeddingVector,
    topics: &'a [TopicRecord],
    skipped: &mut Vec<SkippedTopic>,
) -> Vec<TopicMatch<'a>> {
    let mut scored = Vec::with_capacity(topics.len());
    for (index, topic) in topics.iter().enumerate() {
        let reason = if topic.vector.len() == EMBEDDING_DIM {
            match cosine_similarity(query.as_slice(), &topic.vector) {
                Ok(score) => {
                    scored.push(TopicMatch { topic, score });
                    continue;
                }
                Err(SimilarityError::Degenerate) => continue,
                Err(SimilarityError::NonFinite) => SkipReason::NonFinite,
                Err(SimilarityError::DimensionMismatch { right, .. }) => {
                    SkipReason::WrongDimension { actual: right }
                }
            }
        } else {
            SkipReason::WrongDimension {
                actual: topic.vector.len(),
            }
        };
        warn!(index, topic = %topic.name, %reason, "skipping corpus entry");
        skipped.push(SkippedTopic {
            index,
            name: topic.name.clone(),
            reason,
        });
    }
    scored
}
