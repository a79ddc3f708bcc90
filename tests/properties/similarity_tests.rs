use proptest::prelude::*;

use skemi::corpus::TopicRecord;
use skemi::search::{EMBEDDING_DIM, HashEmbedder, TopicMatcher, cosine_similarity};

fn vector() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10.0f64..10.0, EMBEDDING_DIM)
}

proptest! {
    #[test]
    fn test_cosine_bounded(a in vector(), b in vector()) {
        if let Ok(score) = cosine_similarity(&a, &b) {
            prop_assert!((-1.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_cosine_symmetric(a in vector(), b in vector()) {
        match (cosine_similarity(&a, &b), cosine_similarity(&b, &a)) {
            (Ok(ab), Ok(ba)) => prop_assert!((ab - ba).abs() < 1e-12),
            (Err(_), Err(_)) => {}
            (left, right) => prop_assert!(false, "asymmetric result: {left:?} vs {right:?}"),
        }
    }

    #[test]
    fn test_text_matches_its_own_topic(text in "[a-z]{1,10}( [a-z]{1,10}){0,5}") {
        let embedder = HashEmbedder::default();
        let topics = vec![
            TopicRecord::new("Own", embedder.embed(&text).into_vec()),
            TopicRecord::new("Copy", embedder.embed(&text).into_vec()),
        ];
        let best = TopicMatcher::default().match_topic(&text, &topics).best;
        prop_assert_eq!(best.map(|m| m.topic.name.as_str()), Some("Own"));
    }

    #[test]
    fn test_best_is_max_score(text in "[a-z ]{0,40}", seeds in prop::collection::vec("[a-z]{1,12}", 1..12)) {
        let embedder = HashEmbedder::default();
        let topics: Vec<TopicRecord> = seeds
            .iter()
            .enumerate()
            .map(|(i, seed)| TopicRecord::new(format!("T{i}"), embedder.embed(seed).into_vec()))
            .collect();
        let matcher = TopicMatcher::default();
        let outcome = matcher.match_topic(&text, &topics);
        let ranked = matcher.rank_topics(&text, &topics, topics.len());

        match outcome.best {
            Some(best) => {
                prop_assert!(ranked.iter().all(|m| best.score >= m.score));
                prop_assert_eq!(best.topic.name.as_str(), ranked[0].topic.name.as_str());
            }
            None => prop_assert!(ranked.is_empty()),
        }
    }
}
