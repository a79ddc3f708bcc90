//! skemi - hash embeddings and nearest-topic matching
//!
//! Text is hashed into a fixed 100-bucket, L2-normalized vector and compared
//! against a precomputed topic corpus by cosine similarity.
//!
//! ```
//! use skemi::corpus::TopicRecord;
//! use skemi::search::{HashEmbedder, find_closest_topic};
//!
//! let embedder = HashEmbedder::default();
//! let corpus = vec![
//!     TopicRecord::new("Algebra", embedder.embed("algebra equations").into_vec()),
//!     TopicRecord::new("Astronomy", embedder.embed("stars planets").into_vec()),
//! ];
//! let best = find_closest_topic("Solving algebra equations!", &corpus);
//! assert_eq!(best.map(|t| t.name.as_str()), Some("Algebra"));
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod search;
pub mod test_utils;

pub use error::{Result, SkemiError};
