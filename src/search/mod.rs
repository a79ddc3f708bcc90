//! Text embedding and nearest-topic search.
//!
//! Pure, synchronous and free of global state: text is hashed into a fixed
//! 100-bucket vector and compared to a caller-supplied corpus by cosine
//! similarity.

pub mod embeddings;
pub mod matcher;
pub mod similarity;

pub use embeddings::{EMBEDDING_DIM, EmbeddingVector, HashEmbedder, Tokenization};
pub use matcher::{
    MatchOutcome, SkipReason, SkippedTopic, TopicMatch, TopicMatcher, find_closest_topic,
};
pub use similarity::{SimilarityError, cosine_similarity, l2_norm, l2_normalize};
